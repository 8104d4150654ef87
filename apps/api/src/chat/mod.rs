// Chat: classify the question, then answer it from the employee table or
// the salary model.

pub mod extract;
pub mod handlers;
pub mod responder;
