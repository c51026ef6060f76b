pub mod form;
pub mod new;
