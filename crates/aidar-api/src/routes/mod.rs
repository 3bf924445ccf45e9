pub mod assignments;
pub mod health;
pub mod records;
pub mod surveys;
pub mod views;
