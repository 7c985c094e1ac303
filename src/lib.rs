pub mod fetch;
pub mod pipeline;
pub mod sanitizer;
pub mod translate;
pub mod work_queue;
pub mod xml_parser;
