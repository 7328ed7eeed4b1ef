mod client;
mod support;
