use crate::core::catalog::Catalog;
use crate::utils::error::{MenuError, Result};
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 兩道菜共用同一個名稱時的處理方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum AliasPolicy {
    /// 後插入者覆寫 id，鍵保持原本的位置
    #[default]
    LastWriteWins,
    /// 指向不同菜的重複名稱視為錯誤
    RejectCollisions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AliasTarget {
    dish_id: String,
    /// 預先轉成小寫，比對時不必重算
    folded: String,
}

/// 名稱（正式名或別名，保留原樣）對應到菜的 id
#[derive(Debug, Clone, Default)]
pub struct AliasIndex {
    entries: IndexMap<String, AliasTarget>,
}

impl AliasIndex {
    pub fn build(catalog: &Catalog, policy: AliasPolicy) -> Result<Self> {
        let mut entries: IndexMap<String, AliasTarget> = IndexMap::new();

        for dish in catalog.iter() {
            for name in dish.names() {
                match entries.entry(name.to_string()) {
                    Entry::Occupied(mut occupied) => {
                        let existing = &occupied.get().dish_id;
                        if existing == &dish.id {
                            continue;
                        }
                        if policy == AliasPolicy::RejectCollisions {
                            return Err(MenuError::AliasCollision {
                                alias: name.to_string(),
                                existing: existing.clone(),
                                incoming: dish.id.clone(),
                            });
                        }
                        tracing::debug!(
                            "Alias '{}' re-pointed from {} to {}",
                            name,
                            existing,
                            dish.id
                        );
                        occupied.get_mut().dish_id = dish.id.clone();
                    }
                    Entry::Vacant(vacant) => {
                        vacant.insert(AliasTarget {
                            dish_id: dish.id.clone(),
                            folded: name.to_lowercase(),
                        });
                    }
                }
            }
        }

        tracing::debug!(
            "Built alias index with {} names for {} dishes",
            entries.len(),
            catalog.len()
        );

        Ok(Self { entries })
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.entries.get(alias).map(|t| t.dish_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 依插入順序列出（名稱, id）
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(alias, target)| (alias.as_str(), target.dish_id.as_str()))
    }

    /// 依插入順序列出（小寫名稱, id）
    pub(crate) fn folded(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|target| (target.folded.as_str(), target.dish_id.as_str()))
    }
}
