pub mod cvs;
pub mod offers;
pub mod pagination;
