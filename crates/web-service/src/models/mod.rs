pub mod caller;

pub mod common;

pub mod err;

pub mod permission;

pub mod projects;

pub mod users;
