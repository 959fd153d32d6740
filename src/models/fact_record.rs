use serde::Serialize;

/// 单个数字的事实列表
///
/// `facts` 按发现顺序排列，且互不相同
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactRecord {
    pub number: u64,
    pub facts: Vec<String>,
    /// 拉取失败后由占位文本代替
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub placeholder: bool,
}

impl FactRecord {
    pub fn new(number: u64, facts: Vec<String>) -> Self {
        Self {
            number,
            facts,
            placeholder: false,
        }
    }

    pub fn placeholder(number: u64, text: impl Into<String>) -> Self {
        Self {
            number,
            facts: vec![text.into()],
            placeholder: true,
        }
    }
}
