pub mod client_provider;
pub mod coach;
pub mod openai;
