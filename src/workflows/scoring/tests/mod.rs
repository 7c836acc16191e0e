mod common;

mod codec;
