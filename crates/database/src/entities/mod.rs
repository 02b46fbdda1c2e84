pub mod course;
pub mod instructor;
pub mod period;
pub mod registration;
pub mod section;
pub mod semester;
pub mod student;
pub mod year;

pub use course::Entity as Course;
pub use instructor::Entity as Instructor;
pub use period::Entity as Period;
pub use registration::Entity as Registration;
pub use section::Entity as Section;
pub use semester::Entity as Semester;
pub use student::Entity as Student;
pub use year::Entity as Year;
