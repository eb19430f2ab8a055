//! Tests for command-line parsing and the local runtime

#[cfg(test)]
mod tests {
    use augmento::CompositionPolicy;
    use augmento::io::cli::{Cli, Invocation, PolicyArg};
    use augmento::io::event::ObjectRef;
    use augmento::io::handler::ObjectReport;
    use augmento::io::image::{ChannelOrder, EncodeOptions, encode_jpeg};
    use clap::Parser;
    use ndarray::Array3;
    use std::ffi::OsStr;
    use std::path::{Path, PathBuf};

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["augmento"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).expect("arguments should parse")
    }

    fn report(key: &str) -> ObjectReport {
        ObjectReport {
            source: ObjectRef {
                bucket: "in".to_string(),
                key: key.to_string(),
            },
            outputs: Vec::new(),
        }
    }

    // Tests explicit flags reach the handler settings
    // Verified by ignoring the policy flag
    #[test]
    fn test_flags_map_to_settings() {
        let cli = parse(&[
            "event.json", "-o", "out", "-n", "5", "-s", "9", "-p", "round-robin", "--quality", "90",
            "--bgr", "--crop-height", "32", "--crop-width", "24",
        ]);

        let settings = cli.settings();

        assert_eq!(settings.count, 5);
        assert_eq!(settings.output_bucket, "out");
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.augment.policy, CompositionPolicy::RoundRobin);
        assert_eq!(settings.augment.crop_size, Some((32, 24)));
        assert_eq!(settings.encode.quality, 90);
        assert_eq!(settings.encode.channel_order, ChannelOrder::Bgr);
    }

    // Tests every policy name maps onto its composition policy
    // Verified by mapping every name to the default policy
    #[test]
    fn test_policy_names_map_to_policies() {
        for (name, expected) in [
            ("chain", CompositionPolicy::Chain),
            ("round-robin", CompositionPolicy::RoundRobin),
            ("random-subset", CompositionPolicy::RandomSubset),
        ] {
            let cli = parse(&["e.json", "-o", "o", "--policy", name]);
            assert_eq!(cli.settings().augment.policy, expected, "{name}");
        }
        assert_eq!(parse(&["e.json", "-o", "o"]).policy, PolicyArg::Chain);
    }

    // Tests a single crop dimension implies a square crop
    // Verified by leaving the other dimension unset
    #[test]
    fn test_crop_size_square_default() {
        assert_eq!(parse(&["e.json", "-o", "o", "--crop-height", "8"]).crop_size(), Some((8, 8)));
        assert_eq!(parse(&["e.json", "-o", "o", "--crop-width", "6"]).crop_size(), Some((6, 6)));
        assert_eq!(parse(&["e.json", "-o", "o"]).crop_size(), None);
    }

    // Tests out-of-range quality and unknown policies are rejected
    // Verified by removing the quality range
    #[test]
    fn test_invalid_arguments_rejected() {
        for args in [
            ["augmento", "e.json", "-o", "o", "--quality", "0"],
            ["augmento", "e.json", "-o", "o", "--quality", "101"],
            ["augmento", "e.json", "-o", "o", "--policy", "shuffle"],
        ] {
            assert!(Cli::try_parse_from(args).is_err(), "{args:?} should be rejected");
        }
    }

    // Tests quiet mode disables progress
    // Verified by always showing progress
    #[test]
    fn test_quiet_hides_progress() {
        assert!(parse(&["e.json", "-o", "o"]).should_show_progress());
        assert!(!parse(&["e.json", "-o", "o", "-q"]).should_show_progress());
    }

    // Tests previews for multi-object events are suffixed per object
    // Verified by reusing one preview path for every object
    #[test]
    fn test_preview_path() {
        let preview = Path::new("previews/grid.png");

        assert_eq!(Invocation::preview_path(preview, &report("cat.jpg"), false), preview);
        assert_eq!(
            Invocation::preview_path(preview, &report("pets/dog.v1.jpg"), true),
            PathBuf::from("previews/grid_dog.png")
        );
        assert_eq!(
            Invocation::preview_path(Path::new("grid.png"), &report("a.jpg"), true),
            PathBuf::from("grid_a.png")
        );
    }

    // Tests a full run over a filesystem store writes outputs and a preview
    // Verified by skipping the preview step
    #[test]
    fn test_run_writes_outputs_and_preview() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let image = Array3::from_shape_fn((24, 24, 3), |(r, c, _)| 0.2 + (r + c) as f32 / 80.0);
        let bytes = encode_jpeg(image.view(), EncodeOptions::default(), "cat.jpg")
            .expect("source should encode");
        std::fs::create_dir_all(dir.path().join("in")).expect("Failed to create bucket");
        std::fs::write(dir.path().join("in/cat.jpg"), bytes).expect("Failed to write source");
        let event_path = dir.path().join("event.json");
        std::fs::write(
            &event_path,
            r#"{"Records": [{"s3": {"bucket": {"name": "in"}, "object": {"key": "cat.jpg"}}}]}"#,
        )
        .expect("Failed to write event");
        let preview = dir.path().join("preview.png");

        let cli = Cli::try_parse_from([
            OsStr::new("augmento"),
            event_path.as_os_str(),
            OsStr::new("--store-root"),
            dir.path().as_os_str(),
            OsStr::new("-o"),
            OsStr::new("out"),
            OsStr::new("-n"),
            OsStr::new("4"),
            OsStr::new("-s"),
            OsStr::new("3"),
            OsStr::new("--preview"),
            preview.as_os_str(),
            OsStr::new("-q"),
        ])
        .expect("arguments should parse");

        let reports = Invocation::new(cli).run().expect("run should succeed");

        assert_eq!(reports.len(), 1);
        for index in 0..4 {
            assert!(dir.path().join(format!("out/cat-augmented-{index}.jpg")).is_file());
        }
        let sheet = image::open(&preview).expect("preview should load");
        assert_eq!((sheet.width(), sheet.height()), (48, 48));
    }

    // Tests a missing event file is reported as a file system error
    // Verified by treating a missing event as empty
    #[test]
    fn test_missing_event_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let missing = dir.path().join("missing.json");
        let cli = Cli::try_parse_from([
            OsStr::new("augmento"),
            missing.as_os_str(),
            OsStr::new("-o"),
            OsStr::new("out"),
            OsStr::new("-q"),
        ])
        .expect("arguments should parse");

        assert!(matches!(
            Invocation::new(cli).run(),
            Err(augmento::AugmentError::FileSystem { .. })
        ));
    }
}
