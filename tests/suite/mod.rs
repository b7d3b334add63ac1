mod config;
mod lifecycle;
mod rendering;
mod self_hosted;
mod singleton;
