//! Integration tests for the Gantry connection layer

mod notification_stream;
