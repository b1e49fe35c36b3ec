//! Classification form: state holder and submission controller.

pub mod session;
pub mod submit;

pub use session::{Phase, Session, Ticket};
pub use submit::{Classifier, Dispatch, Pending, prepare, settle, submit};
