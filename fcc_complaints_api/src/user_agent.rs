/// User agent sent with every request, e.g. `fcc_complaints/0.1.0`.
pub fn get_user_agent() -> String {
    format!("fcc_complaints/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::get_user_agent;

    #[test]
    fn user_agent_carries_version() {
        let agent = get_user_agent();
        assert!(agent.starts_with("fcc_complaints/"));
        assert!(agent.ends_with(env!("CARGO_PKG_VERSION")));
    }
}
