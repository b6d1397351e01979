pub mod form_field;
pub mod student_code_field;
pub mod student_form;
