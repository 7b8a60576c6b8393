use serde::{Deserialize, Serialize};

/// 各代 SciELO PID
///
/// `other` 为别名桶，收录历史上曾使用过的其他标识。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScieloPids {
    #[serde(default)]
    pub v1: Option<String>,
    #[serde(default)]
    pub v2: Option<String>,
    #[serde(default)]
    pub v3: Option<String>,
    #[serde(default)]
    pub other: Vec<String>,
}

/// 标识字段种类
///
/// 声明顺序即 [`IdentifierSet::lookup_plan`] 的查找优先级。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PidKind {
    /// 主键
    Id,
    /// 别名桶成员
    Other,
    /// 旧版复合 pid
    Pid,
    /// 提前出版时期的 pid
    AopPid,
    V1,
    V2,
    V3,
}

/// 文章的全部标识
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierSet {
    pub id: String,
    #[serde(default)]
    pub pid: Option<String>,
    #[serde(default)]
    pub aop_pid: Option<String>,
    #[serde(default)]
    pub scielo_pids: ScieloPids,
}

impl IdentifierSet {
    /// 判断给定种类的字段是否与 `value` 精确相等
    pub fn matches(&self, kind: PidKind, value: &str) -> bool {
        let eq = |field: &Option<String>| field.as_deref() == Some(value);
        match kind {
            PidKind::Id => self.id == value,
            PidKind::Other => self.scielo_pids.other.iter().any(|p| p == value),
            PidKind::Pid => eq(&self.pid),
            PidKind::AopPid => eq(&self.aop_pid),
            PidKind::V1 => eq(&self.scielo_pids.v1),
            PidKind::V2 => eq(&self.scielo_pids.v2),
            PidKind::V3 => eq(&self.scielo_pids.v3),
        }
    }

    /// 生成按优先级排列的 `(字段, 值)` 查找序列
    ///
    /// 1. 主键或别名桶
    /// 2. `pid` 原值，随后是修正后的拼写
    /// 3. `aop_pid` 原值，随后是修正后的拼写
    /// 4. `scielo_pids` 的 v1/v2/v3
    pub fn lookup_plan(value: &str, normalizer: &PidNormalizer) -> Vec<(PidKind, String)> {
        let mut plan = vec![
            (PidKind::Id, value.to_string()),
            (PidKind::Other, value.to_string()),
        ];

        let alternate = normalizer.alternate(value);
        for kind in [PidKind::Pid, PidKind::AopPid] {
            plan.push((kind, value.to_string()));
            if let Some(fixed) = &alternate {
                plan.push((kind, fixed.clone()));
            }
        }

        plan.extend([PidKind::V1, PidKind::V2, PidKind::V3].map(|k| (k, value.to_string())));
        plan
    }
}

/// 历史迁移中被写错的 PID 前缀，`(错误, 正确)`
const PREFIX_FIXES: &[(&str, &str)] = &[
    ("S0100-879x", "S0100-879X"),
    ("S0102-311x", "S0102-311X"),
    ("S0034-8901", "S0034-8910"),
];

/// PID 前缀修正表
///
/// 表中每一对前缀在两个方向上都能被识别。
#[derive(Debug, Clone)]
pub struct PidNormalizer {
    pairs: Vec<(String, String)>,
}

impl Default for PidNormalizer {
    fn default() -> Self {
        Self::new(std::iter::empty::<(String, String)>())
    }
}

impl PidNormalizer {
    /// 在内置表之后追加额外的前缀对
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let pairs = PREFIX_FIXES
            .iter()
            .map(|(w, r)| (w.to_string(), r.to_string()))
            .chain(extra.into_iter().map(|(w, r)| (w.into(), r.into())))
            .collect();
        Self { pairs }
    }

    /// 将匹配的前缀替换为其配对值，未收录的前缀原样返回
    ///
    /// 错误与正确两种拼写都会被映射为正确拼写，因此 `normalize` 是幂等的。
    pub fn normalize(&self, id: &str) -> String {
        for (wrong, right) in &self.pairs {
            if let Some(rest) = id.strip_prefix(wrong.as_str()) {
                return format!("{right}{rest}");
            }
        }
        id.to_string()
    }

    /// 返回另一种拼写，前缀不在表中时返回 `None`
    pub fn alternate(&self, id: &str) -> Option<String> {
        self.pairs.iter().find_map(|(wrong, right)| {
            if let Some(rest) = id.strip_prefix(wrong.as_str()) {
                Some(format!("{right}{rest}"))
            } else {
                id.strip_prefix(right.as_str())
                    .map(|rest| format!("{wrong}{rest}"))
            }
        })
    }
}
