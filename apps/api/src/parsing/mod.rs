// Document Parser: container text extraction plus heuristic field extractors.
// Failures resolve to sentinel values or `None`, never to errors.

pub mod extract;
pub mod fields;
pub mod handlers;
pub mod parser;
pub mod sections;
pub mod skills;
