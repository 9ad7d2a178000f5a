//! Reply-generator boundary: the [`provider::ReplyProvider`] trait and an
//! OpenAI-compatible HTTP implementation.

pub mod openai;
pub mod persona;
pub mod provider;
