pub mod answer;
pub mod assignment;
pub mod patient;
pub mod physician;
pub mod question;
pub mod survey;
