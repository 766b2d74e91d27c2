pub mod pagination;
pub mod response;
pub mod transformer;
pub mod validation;
