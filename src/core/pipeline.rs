use crate::core::aggregate::aggregate;
use crate::core::parser::{number_lines, parse_lines};
use crate::core::report::render_report;
use crate::core::{ConfigProvider, Pipeline, RawLine, Storage, TransformResult};
use crate::utils::error::{GradeError, Result};

/// Reads the student file, grades it and writes the text report.
pub struct GradePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> GradePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for GradePipeline<S, C> {
    fn extract(&self) -> Result<Vec<RawLine>> {
        let path = self.config.input_path();
        tracing::debug!("Reading student records from: {}", path);

        let bytes = self.storage.read_file(path)?;
        let content = String::from_utf8(bytes).map_err(|e| {
            GradeError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })?;

        Ok(number_lines(&content))
    }

    fn transform(&self, lines: Vec<RawLine>) -> Result<TransformResult> {
        let (students, diagnostics) = parse_lines(&lines);
        let statistics = aggregate(&students);

        tracing::debug!(
            "Class average {:.2} over {} students",
            statistics.class_average,
            statistics.total_students
        );

        Ok(TransformResult {
            students,
            statistics,
            diagnostics,
        })
    }

    fn load(&self, result: &TransformResult) -> Result<String> {
        let path = self.config.output_path();
        let report = render_report(&result.students, &result.statistics);

        tracing::debug!("Writing report ({} bytes) to: {}", report.len(), path);
        self.storage.write_file(path, report.as_bytes())?;

        Ok(path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::RecordErrorKind;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        fn with_file(self, path: &str, content: &str) -> Self {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_string(), content.as_bytes().to_vec());
            self
        }

        fn get_file(&self, path: &str) -> Option<String> {
            let files = self.files.lock().unwrap();
            files
                .get(path)
                .map(|data| String::from_utf8(data.clone()).unwrap())
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().unwrap();
            files
                .get(path)
                .cloned()
                .ok_or_else(|| GradeError::SourceNotFound {
                    path: path.to_string(),
                })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().unwrap();
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct TestConfig;

    impl ConfigProvider for TestConfig {
        fn input_path(&self) -> &str {
            "students.csv"
        }

        fn output_path(&self) -> &str {
            "report.txt"
        }
    }

    #[test]
    fn test_extract_numbers_lines() {
        let storage =
            MockStorage::new().with_file("students.csv", "S1,A,1,2,3,4\n\nS2,B,5,6,7,8");
        let pipeline = GradePipeline::new(storage, TestConfig);

        let lines = pipeline.extract().unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].number, 2);
        assert_eq!(lines[1].text, "");
        assert_eq!(lines[2].text, "S2,B,5,6,7,8");
    }

    #[test]
    fn test_extract_missing_input() {
        let pipeline = GradePipeline::new(MockStorage::new(), TestConfig);
        let err = pipeline.extract().unwrap_err();
        assert!(matches!(err, GradeError::SourceNotFound { .. }));
    }

    #[test]
    fn test_extract_rejects_invalid_utf8() {
        let storage = MockStorage::new();
        storage
            .files
            .lock()
            .unwrap()
            .insert("students.csv".to_string(), vec![0xff, 0xfe, b'\n']);
        let pipeline = GradePipeline::new(storage, TestConfig);

        let err = pipeline.extract().unwrap_err();
        assert!(matches!(err, GradeError::IoFailure { .. }));
    }

    #[test]
    fn test_transform_and_load() {
        let storage = MockStorage::new().with_file(
            "students.csv",
            "S1,Alice,90,90,90,90\nS2,Bob,50,50,50,200\nS3,Carl,abc,70,80,90\nS4,Dana,70,70,70,70\n",
        );
        let pipeline = GradePipeline::new(storage.clone(), TestConfig);

        let lines = pipeline.extract().unwrap();
        let result = pipeline.transform(lines).unwrap();

        assert_eq!(result.students.len(), 2);
        assert_eq!(result.statistics.total_students, 2);
        assert!((result.statistics.class_average - 80.0).abs() < 1e-9);
        let kinds: Vec<RecordErrorKind> = result.diagnostics.iter().map(|d| d.kind()).collect();
        assert_eq!(
            kinds,
            vec![RecordErrorKind::GradeOutOfRange, RecordErrorKind::InvalidNumber]
        );

        let output = pipeline.load(&result).unwrap();
        assert_eq!(output, "report.txt");

        let report = storage.get_file("report.txt").unwrap();
        assert!(report.contains("ID: S1, Name: Alice, Average Grade: 90.00, Letter Grade: A"));
        assert!(report.contains("ID: S4, Name: Dana, Average Grade: 70.00, Letter Grade: C"));
        assert!(!report.contains("Bob"));
        assert!(!report.contains("Carl"));
        assert!(report.contains("Total Students: 2"));
        assert!(report.contains("Class Average: 80.00"));
        assert!(report.contains("A: 1, B: 0, C: 1, D: 0, F: 0"));
    }
}
