mod support;

mod batch_resolution;
mod cli_contracts;
mod local_tier;
