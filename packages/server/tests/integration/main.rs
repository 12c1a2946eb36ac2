mod common;

mod chat;
mod files;
mod upload;
