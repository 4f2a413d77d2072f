mod config;
mod integration;
