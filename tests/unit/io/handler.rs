//! Tests for storage event handling over an in-memory store

#[cfg(test)]
mod tests {
    use augmento::AugmentError;
    use augmento::io::event::ObjectRef;
    use augmento::io::handler::{EventHandler, HandlerSettings};
    use augmento::io::image::{EncodeOptions, decode_image, encode_jpeg};
    use augmento::io::storage::MemoryStore;
    use ndarray::Array3;

    fn source_bytes(rows: usize, cols: usize) -> Vec<u8> {
        let image = Array3::from_shape_fn((rows, cols, 3), |(r, c, ch)| {
            0.2 + 0.6 * ((r + c + ch * 3) % 10) as f32 / 10.0
        });
        encode_jpeg(image.view(), EncodeOptions::default(), "source").expect("source should encode")
    }

    fn event(records: &[(&str, &str)]) -> String {
        let records: Vec<String> = records
            .iter()
            .map(|(bucket, key)| {
                format!(r#"{{"s3": {{"bucket": {{"name": "{bucket}"}}, "object": {{"key": "{key}"}}}}}}"#)
            })
            .collect();
        format!(r#"{{"Records": [{}]}}"#, records.join(","))
    }

    fn settings(count: usize) -> HandlerSettings {
        HandlerSettings {
            count,
            seed: Some(17),
            ..HandlerSettings::new("augmented")
        }
    }

    // Tests each object yields count outputs of the source shape in the output bucket
    // Verified by writing outputs back to the source bucket
    #[test]
    fn test_event_generates_outputs() {
        let store = MemoryStore::new();
        store.insert("uploads", "pets/cat.png", source_bytes(40, 30));
        let mut handler = EventHandler::new(store, settings(3)).expect("settings are valid");

        let reports = handler
            .handle_event(&event(&[("uploads", "pets/cat.png")]))
            .expect("event should be handled");

        assert_eq!(reports.len(), 1);
        assert_eq!(
            reports[0].outputs,
            vec!["cat-augmented-0.jpg", "cat-augmented-1.jpg", "cat-augmented-2.jpg"]
        );
        for name in &reports[0].outputs {
            let bytes = handler.store().get("augmented", name).expect("output should exist");
            let decoded = decode_image(&bytes, name).expect("output should decode");
            assert_eq!(decoded.dim(), (40, 30, 3));
        }
        assert_eq!(handler.store().keys("uploads"), vec!["pets/cat.png"]);
    }

    // Tests every record of a multi-record event is processed
    // Verified by handling only the first record
    #[test]
    fn test_every_record_processed() {
        let store = MemoryStore::new();
        store.insert("in", "a.jpg", source_bytes(20, 20));
        store.insert("in", "b.jpg", source_bytes(24, 16));
        let mut handler = EventHandler::new(store, settings(2)).expect("settings are valid");

        let reports = handler
            .handle_event(&event(&[("in", "a.jpg"), ("in", "b.jpg")]))
            .expect("event should be handled");

        assert_eq!(reports.len(), 2);
        assert_eq!(handler.store().keys("augmented").len(), 4);
        assert_eq!(reports[1].source.key, "b.jpg");
    }

    // Tests encoded keys are decoded before the object is read
    // Verified by reading the raw key from the event
    #[test]
    fn test_encoded_key_is_decoded() {
        let store = MemoryStore::new();
        store.insert("in", "my cat.jpg", source_bytes(12, 12));
        let mut handler = EventHandler::new(store, settings(1)).expect("settings are valid");

        let reports = handler
            .handle_event(&event(&[("in", "my+cat.jpg")]))
            .expect("event should be handled");

        assert_eq!(reports[0].outputs, vec!["my cat-augmented-0.jpg"]);
    }

    // Tests output names use the text before the first dot of the file name
    // Verified by stripping only the final extension
    #[test]
    fn test_output_names_from_base_name() {
        let store = MemoryStore::new();
        store.insert("in", "shots/photo.v2.png", source_bytes(12, 12));
        let mut handler = EventHandler::new(store, settings(2)).expect("settings are valid");

        let reports = handler
            .handle_event(&event(&[("in", "shots/photo.v2.png")]))
            .expect("event should be handled");

        assert_eq!(
            reports[0].outputs,
            vec!["photo-augmented-0.jpg", "photo-augmented-1.jpg"]
        );
    }

    // Tests a zero count processes the object without writing anything
    // Verified by clamping the count to at least one
    #[test]
    fn test_zero_count_writes_nothing() {
        let store = MemoryStore::new();
        store.insert("in", "a.jpg", source_bytes(10, 10));
        let mut handler = EventHandler::new(store, settings(0)).expect("settings are valid");

        let report = handler
            .handle_object(ObjectRef {
                bucket: "in".to_string(),
                key: "a.jpg".to_string(),
            })
            .expect("object should be handled");

        assert!(report.outputs.is_empty());
        assert!(handler.store().keys("augmented").is_empty());
    }

    // Tests missing and undecodable objects surface as errors
    // Verified by skipping objects that fail to load
    #[test]
    fn test_unreadable_objects_fail() {
        let store = MemoryStore::new();
        store.insert("in", "broken.jpg", b"garbage".to_vec());
        let mut handler = EventHandler::new(store, settings(2)).expect("settings are valid");

        assert!(matches!(
            handler.handle_event(&event(&[("in", "missing.jpg")])),
            Err(AugmentError::Storage { .. })
        ));
        assert!(matches!(
            handler.handle_event(&event(&[("in", "broken.jpg")])),
            Err(AugmentError::ImageDecode { .. })
        ));
        assert!(matches!(
            handler.handle_event("not json"),
            Err(AugmentError::MalformedEvent { .. })
        ));
    }

    // Tests events without records succeed with no work
    // Verified by requiring at least one record
    #[test]
    fn test_empty_event() {
        let mut handler =
            EventHandler::new(MemoryStore::new(), settings(3)).expect("settings are valid");

        assert!(handler.handle_event("{}").expect("event should be handled").is_empty());
        assert_eq!(handler.settings().output_bucket, "augmented");
    }

    // Tests invalid augmentation settings are rejected at construction
    // Verified by validating lazily on first use
    #[test]
    fn test_invalid_settings_rejected() {
        let mut invalid = settings(1);
        invalid.augment.max_noise_sigma = -1.0;

        assert!(EventHandler::new(MemoryStore::new(), invalid).is_err());
    }
}
