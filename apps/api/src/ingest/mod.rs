// Document intake: upload staging, remote download, text extraction and the
// primary structured parser. Everything here performs I/O on behalf of the
// synchronous analysis engine.

pub mod handlers;
pub mod parser_client;
pub mod text_extract;
pub mod upload;
