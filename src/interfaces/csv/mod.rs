pub mod link_writer;
pub mod request_reader;
