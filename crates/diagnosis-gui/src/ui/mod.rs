pub mod form;
pub mod theme;
pub mod verdict;
