#![doc = include_str!("../README.md")]

extern crate alloc;

mod config;
mod cookie_jar;
mod error;
mod request;
mod response;
mod session;
mod transfer_error;

pub use self::{
    config::*,
    cookie_jar::FileCookieJar,
    error::Error,
    request::{PostBody, PostField, RequestConfig},
    response::{ResponseInfo, Transfer},
    session::Session,
    transfer_error::{TransferError, TransferErrorKind},
};
