//! 结果写入服务 - 业务能力层
//!
//! 只负责"把一次提交的结果追加到文件"能力

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use crate::error::Result;
use crate::models::FactRecord;

/// 结果写入服务
pub struct ResultWriter {
    path: PathBuf,
}

impl ResultWriter {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 追加一次提交的全部结果
    ///
    /// # 参数
    /// - `condensed`: 回显给用户的输入
    /// - `records`: 已按数字升序排列的结果
    pub fn write(&self, condensed: &str, records: &[FactRecord]) -> Result<()> {
        debug!(
            "写入结果: {} | {} 个数字",
            self.path.display(),
            records.len()
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.write_all(format_block(condensed, records).as_bytes())?;

        Ok(())
    }
}

fn format_block(condensed: &str, records: &[FactRecord]) -> String {
    let mut block = format!(
        "{}\n{} | {}\n{}\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        condensed,
        "=".repeat(60)
    );

    for record in records {
        block.push_str(&format!("{}\n", record.number));
        for fact in &record.facts {
            block.push_str(&format!("  - {}\n", fact));
        }
    }
    block.push('\n');
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_appends_blocks() {
        let path = std::env::temp_dir().join(format!(
            "number_facts_results_{}.txt",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let writer = ResultWriter::with_path(&path);
        let records = vec![
            FactRecord::new(1, vec!["one fact".to_string()]),
            FactRecord::new(2, vec!["two fact".to_string(), "another".to_string()]),
        ];
        writer.write("1,2", &records).unwrap();
        writer.write("1,2", &records).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("| 1,2").count(), 2);
        assert!(content.contains("  - another\n"));

        let _ = std::fs::remove_file(&path);
    }
}
