pub mod get;
pub mod history;
pub mod inspect;
pub mod submit;
pub mod versions;
