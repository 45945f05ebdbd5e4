/// # Summary
/// 从远端分隔文本解析得到的原始表格。
///
/// # Invariants
/// - 表头单元格已去除首尾空白。
/// - 数据行长度可能与表头不一致，越界单元格视为空字符串。
/// - 加载后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// 构建表格并去除表头空白
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = headers.into_iter().map(|h| h.trim().to_string()).collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 按表头名称查找列序号 (精确匹配)
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// 读取单元格，越界返回空字符串
    pub fn cell(row: &[String], index: usize) -> &str {
        row.get(index).map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_trimmed() {
        let table = Table::new(
            vec![" Data ".into(), "PDD Prevista\u{0020}".into()],
            vec![vec!["01/03/2025".into()]],
        );
        assert_eq!(table.headers(), ["Data", "PDD Prevista"]);
        assert_eq!(table.column_index("PDD Prevista"), Some(1));
        assert_eq!(table.column_index("pdd prevista"), None);
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let table = Table::new(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into()]],
        );
        let row = &table.rows()[0];
        assert_eq!(Table::cell(row, 0), "1");
        assert_eq!(Table::cell(row, 1), "");
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
    }
}
