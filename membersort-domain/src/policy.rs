use crate::order_list::{DEFAULT_ORDER_BY_NAME, default_order, parse_order_list};
use membersort_types::plan::{Diagnostic, OrderSource, PlanPolicy, diagnostic_codes};
use std::collections::HashMap;
use tracing::warn;

/// Position of the first exact match of `signature` in `order`, `None` when absent.
///
/// `None` orders before every `Some`, so unranked signatures sort first.
pub fn rank(signature: &str, order: &[String]) -> Option<usize> {
    order.iter().position(|entry| entry == signature)
}

/// Immutable snapshot of the user's ordering preference, shared by every comparison of a pass.
#[derive(Debug, Clone)]
pub struct OrderPolicy {
    order: Vec<String>,
    ranks: HashMap<String, usize>,
    order_by_name: bool,
    source: OrderSource,
}

/// A policy together with the diagnostics raised while loading it.
#[derive(Debug, Clone)]
pub struct LoadedPolicy {
    pub policy: OrderPolicy,
    pub diagnostics: Vec<Diagnostic>,
}

impl OrderPolicy {
    pub fn new(order: Vec<String>, order_by_name: bool) -> Self {
        Self::with_source(order, order_by_name, OrderSource::Stored)
    }

    /// The built-in order with the default name tie-break.
    pub fn builtin() -> Self {
        Self::with_source(default_order(), DEFAULT_ORDER_BY_NAME, OrderSource::Default)
    }

    fn with_source(order: Vec<String>, order_by_name: bool, source: OrderSource) -> Self {
        let mut ranks = HashMap::with_capacity(order.len());
        for (i, entry) in order.iter().enumerate() {
            // Duplicates keep their first position.
            ranks.entry(entry.clone()).or_insert(i);
        }
        Self {
            order,
            ranks,
            order_by_name,
            source,
        }
    }

    /// Build a policy from persisted preference values.
    ///
    /// A missing order list selects the built-in order; a malformed one is replaced by the
    /// built-in order and reported, never propagated.
    pub fn load(persisted_order: Option<&str>, order_by_name: Option<bool>) -> LoadedPolicy {
        let order_by_name = order_by_name.unwrap_or(DEFAULT_ORDER_BY_NAME);

        let Some(persisted) = persisted_order else {
            return LoadedPolicy {
                policy: Self::with_source(default_order(), order_by_name, OrderSource::Default),
                diagnostics: vec![],
            };
        };

        match parse_order_list(persisted) {
            Ok(order) => LoadedPolicy {
                policy: Self::new(order, order_by_name),
                diagnostics: vec![],
            },
            Err(e) => {
                warn!("stored order list is malformed ({}), using the built-in order", e);
                LoadedPolicy {
                    policy: Self::with_source(default_order(), order_by_name, OrderSource::Fallback),
                    diagnostics: vec![Diagnostic {
                        code: diagnostic_codes::MALFORMED_ORDER.to_string(),
                        message: format!("stored order list is malformed: {e}"),
                        scope: None,
                        signature: None,
                    }],
                }
            }
        }
    }

    pub fn rank(&self, signature: &str) -> Option<usize> {
        self.ranks.get(signature).copied()
    }

    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn order_by_name(&self) -> bool {
        self.order_by_name
    }

    pub fn source(&self) -> OrderSource {
        self.source
    }

    pub fn to_plan_policy(&self) -> PlanPolicy {
        PlanPolicy {
            order_by_name: self.order_by_name,
            order: self.order.clone(),
            order_source: self.source,
        }
    }
}
