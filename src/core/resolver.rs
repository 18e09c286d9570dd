//! 查詢字串對應到菜的 id。
//!
//! 兩階段比對，皆不分大小寫、先去除前後空白：
//! 1. 完全相等：依索引插入順序，第一個小寫名稱等於查詢者勝出。
//! 2. 子字串：第一階段沒有結果時，第一個包含查詢字串的名稱勝出。
//!
//! 多個名稱同時符合時，結果由索引插入順序決定，不做排名。

use crate::core::alias::AliasIndex;

pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

pub fn resolve<'a>(query: &str, index: &'a AliasIndex) -> Option<&'a str> {
    let needle = normalize_query(query);

    if let Some(id) = index
        .folded()
        .find(|(folded, _)| *folded == needle)
        .map(|(_, id)| id)
    {
        return Some(id);
    }

    // 空查詢只可能完全符合空名稱
    if needle.is_empty() {
        return None;
    }

    index
        .folded()
        .find(|(folded, _)| folded.contains(needle.as_str()))
        .map(|(_, id)| id)
}
