use crate::domain::model::{RawLine, TransformResult};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<RawLine>>;
    fn transform(&self, lines: Vec<RawLine>) -> Result<TransformResult>;
    fn load(&self, result: &TransformResult) -> Result<String>;
}
