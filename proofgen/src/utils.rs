use stdmt::Hash32;

pub fn init_logging(max_level: &str) {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(max_level));
}

pub fn fmt_hash(h: &Hash32) -> String {
    format!("0x{}", hex::encode(h))
}

pub fn fmt_hashes(hashes: &[Hash32]) -> Vec<String> {
    hashes.iter().map(fmt_hash).collect()
}
