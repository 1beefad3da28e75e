#[cfg(test)]
mod tests {
    use crate::config::{self, UiConfig};
    use crate::error::ConfigError;

    #[test]
    fn test_default_config() {
        let config = UiConfig::default();

        assert_eq!(config.endpoints.base, "");
        assert_eq!(config.endpoints.upload, "/upload");
        assert_eq!(config.endpoints.files, "/files");
        assert_eq!(config.endpoints.download, "/download");
        assert_eq!(config.endpoints.delete, "/delete");
        assert_eq!(config.timing.progress_settle_ms, 1000);
        assert_eq!(config.timing.notice_ttl_ms, 3000);
        assert_eq!(config.qr.size, 256);
        assert_eq!(config.qr.dark, "#1a237e");
        assert_eq!(config.qr.light, "#ffffff");
        assert_eq!(config.qr.ec_level, "H");
        assert_eq!(config.messages.confirm_delete, "确定要删除这个文件吗？");
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn test_override_merges_with_defaults() {
        let config = config::load(Some(
            r#"
[endpoints]
base = "/share"

[timing]
notice_ttl_ms = 5000

[messages]
upload_ok = "Upload erfolgreich"
"#,
        ))
        .unwrap();

        assert_eq!(config.endpoints.base, "/share");
        assert_eq!(config.endpoints.upload, "/upload");
        assert_eq!(config.timing.notice_ttl_ms, 5000);
        assert_eq!(config.timing.progress_settle_ms, 1000);
        assert_eq!(config.messages.upload_ok, "Upload erfolgreich");
        assert_eq!(config.messages.upload_failed, "上传失败");
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let config = config::load(Some("  \n ")).unwrap();
        assert_eq!(config, UiConfig::default());
    }

    #[test]
    fn test_invalid_ec_level() {
        let result = config::load(Some("[qr]\nec_level = \"X\"\n"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("qr.ec_level"));
    }

    #[test]
    fn test_zero_timings_rejected() {
        let err = config::load(Some("[timing]\nprogress_settle_ms = 0\n")).unwrap_err();
        assert!(err.to_string().contains("timing.progress_settle_ms"));

        let err = config::load(Some("[timing]\nnotice_ttl_ms = 0\n")).unwrap_err();
        assert!(err.to_string().contains("timing.notice_ttl_ms"));
    }

    #[test]
    fn test_relative_endpoint_rejected() {
        let err = config::load(Some("[endpoints]\nfiles = \"files\"\n")).unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "endpoints.files"),
            other => panic!("Expected Invalid, got {:?}", other),
        }

        let err = config::load(Some("[endpoints]\nbase = \"/share/\"\n")).unwrap_err();
        assert!(err.to_string().contains("endpoints.base"));
    }

    #[test]
    fn test_qr_size_bounds() {
        assert!(config::load(Some("[qr]\nsize = 20\n")).is_err());
        assert!(config::load(Some("[qr]\nsize = 5000\n")).is_err());
        assert_eq!(config::load(Some("[qr]\nsize = 512\n")).unwrap().qr.size, 512);
    }

    #[test]
    fn test_empty_message_rejected() {
        let err = config::load(Some("[messages]\ndelete_ok = \" \"\n")).unwrap_err();
        assert!(err.to_string().contains("messages.delete_ok"));
    }

    #[test]
    fn test_malformed_toml() {
        let err = config::load(Some("[timing\nnotice_ttl_ms = ")).unwrap_err();
        assert!(matches!(err, ConfigError::Source(_)));
    }
}
