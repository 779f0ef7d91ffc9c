mod scheduler;
mod trigger_import;

pub use scheduler::*;
pub use trigger_import::*;

use actix_web::{web, Scope};

pub fn import_source() -> Scope {
    web::scope("/import").route("/run", web::post().to(trigger_import))
}
