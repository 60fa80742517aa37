// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::{BTreeMap, BTreeSet};

/// 域名 → 模式列表的完整快照，持久化的最小单位
///
/// 使用有序映射以保证序列化结果稳定
pub type PatternMap = BTreeMap<String, Vec<String>>;

/// 将新模式合并到已有模式中
///
/// 结果按集合语义去重，顺序无语义意义（匹配时任一模式命中即可）
pub fn merge_patterns(existing: &[String], new_patterns: &[String]) -> Vec<String> {
    existing
        .iter()
        .chain(new_patterns.iter())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// 去掉没有任何模式的域名
///
/// 存储中的每个域名至少对应一个模式
pub fn without_empty(patterns: &PatternMap) -> PatternMap {
    patterns
        .iter()
        .filter(|(_, list)| !list.is_empty())
        .map(|(domain, list)| (domain.clone(), list.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_merge_deduplicates() {
        let merged = merge_patterns(
            &strings(&["/dp/[0-9]+", "/p/[A-Za-z0-9_-]+"]),
            &strings(&["/p/[A-Za-z0-9_-]+", "/item/[0-9]+"]),
        );
        assert_eq!(merged.len(), 3);
        assert!(merged.contains(&"/item/[0-9]+".to_string()));
    }

    #[test]
    fn test_merge_into_empty() {
        let merged = merge_patterns(&[], &strings(&["/sku/[0-9]+", "/sku/[0-9]+"]));
        assert_eq!(merged, strings(&["/sku/[0-9]+"]));
    }

    #[test]
    fn test_without_empty_drops_bare_domains() {
        let mut map = PatternMap::new();
        map.insert("empty.test".to_string(), Vec::new());
        map.insert("shop.test".to_string(), strings(&["/p/[0-9]+"]));

        let kept = without_empty(&map);

        assert_eq!(kept.len(), 1);
        assert!(kept.contains_key("shop.test"));
    }
}
