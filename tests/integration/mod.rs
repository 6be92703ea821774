mod pipeline;
mod server_contract;
mod test_utils;
