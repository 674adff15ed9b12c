//! The Copy Plan Cache.
//!
//! A [`CopyPlan`] pairs the properties two bean types have in common, by name.
//! It only stores structure: values are resolved on every copy.
//!
//! Plans are built once per (source type, target type) and cached by the
//! [`PlanCache`] of each mapper. The cache only grows.

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use bm_reflect::{Bean, BeanInfo, PropertyInfo, TypeDesc, Value};
use bm_utils::{TypePair, TypePairMap};

use crate::is_assignable;

// -----------------------------------------------------------------------------
// PropertyPair

/// A property present, by name, on both the source and the target type.
#[derive(Clone, Copy)]
pub struct PropertyPair {
    source: &'static PropertyInfo,
    target: &'static PropertyInfo,
    assignable: bool,
}

impl PropertyPair {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.target.name()
    }

    #[inline]
    pub fn source(&self) -> &'static PropertyInfo {
        self.source
    }

    #[inline]
    pub fn target(&self) -> &'static PropertyInfo {
        self.target
    }

    /// Whether the declared source type is assignable to the declared target type.
    #[inline]
    pub fn is_assignable(&self) -> bool {
        self.assignable
    }

    /// Writes a resolved value into the target property.
    ///
    /// If the property refuses the value, it is cleared instead. If it cannot
    /// be cleared either, it is left untouched.
    pub(crate) fn write(&self, target: &mut dyn Bean, value: Option<Value>) {
        let had_value = value.is_some();
        let Err(err) = self.target.set(target, value) else {
            return;
        };

        if had_value {
            log::trace!("property `{}` refused the value ({err}), clearing it", self.name());
            if let Err(err) = self.target.set(target, None) {
                log::trace!("property `{}` left unchanged: {err}", self.name());
            }
        } else {
            log::trace!("property `{}` left unchanged: {err}", self.name());
        }
    }
}

impl fmt::Debug for PropertyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyPair")
            .field("name", &self.name())
            .field("source", &self.source.type_desc().path())
            .field("target", &self.target.type_desc().path())
            .field("assignable", &self.assignable)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// CopyPlan

/// The properties shared by a source and a target bean type.
pub struct CopyPlan {
    source: &'static TypeDesc,
    target: &'static TypeDesc,
    pairs: Box<[PropertyPair]>,
}

impl CopyPlan {
    /// Pairs the properties of `target` with the same-named properties of
    /// `source`, in the declaration order of `target`. Properties present on
    /// only one side are dropped.
    pub fn build(source: &'static BeanInfo, target: &'static BeanInfo) -> Self {
        let pairs = target
            .iter()
            .filter_map(|target_prop| {
                let source_prop = source.property(target_prop.name())?;
                Some(PropertyPair {
                    source: source_prop,
                    target: target_prop,
                    assignable: is_assignable(source_prop.type_desc(), target_prop.type_desc()),
                })
            })
            .collect();

        Self {
            source: source.type_desc(),
            target: target.type_desc(),
            pairs,
        }
    }

    #[inline]
    pub fn source(&self) -> &'static TypeDesc {
        self.source
    }

    #[inline]
    pub fn target(&self) -> &'static TypeDesc {
        self.target
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &PropertyPair> {
        self.pairs.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Debug for CopyPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyPlan")
            .field("source", &self.source.path())
            .field("target", &self.target.path())
            .field("pairs", &self.pairs)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// PlanCache

/// Cache of [`CopyPlan`]s keyed by (source type, target type).
///
/// Lookups take the read lock. On a miss the plan is built with no lock held
/// and inserted under the write lock; if another thread inserted first, its
/// plan is kept and returned.
pub struct PlanCache {
    plans: RwLock<TypePairMap<Arc<CopyPlan>>>,
}

impl PlanCache {
    pub const fn new() -> Self {
        Self {
            plans: RwLock::new(TypePairMap::new()),
        }
    }

    /// Returns the plan for the pair, building it on first use.
    pub fn get_or_build(&self, source: &'static BeanInfo, target: &'static BeanInfo) -> Arc<CopyPlan> {
        let key = TypePair::new(source.type_desc().id(), target.type_desc().id());

        if let Some(plan) = self.get_by_pair(&key) {
            return plan;
        }

        log::trace!(
            "building copy plan `{}` -> `{}`",
            source.type_desc().path(),
            target.type_desc().path()
        );
        let plan = Arc::new(CopyPlan::build(source, target));

        let mut plans = self.plans.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(plans.get_or_insert(key, || plan))
    }

    /// Returns the cached plan for the pair, if any.
    pub fn get(&self, source: TypeId, target: TypeId) -> Option<Arc<CopyPlan>> {
        self.get_by_pair(&TypePair::new(source, target))
    }

    fn get_by_pair(&self, key: &TypePair) -> Option<Arc<CopyPlan>> {
        self.plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// The number of cached plans.
    pub fn len(&self) -> usize {
        self.plans.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PlanCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanCache").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{CopyPlan, PlanCache};
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use bm_reflect::{Bean, Introspect};
    use core::any::TypeId;

    #[derive(Bean)]
    struct Left {
        id: u32,
        name: Option<String>,
        only_left: bool,
        score: i32,
    }

    #[derive(Bean)]
    struct Right {
        score: i64,
        name: String,
        id: Option<u32>,
        only_right: char,
    }

    #[test]
    fn pairs_by_name_in_target_order() {
        let plan = CopyPlan::build(Left::bean_info(), Right::bean_info());
        let names: Vec<_> = plan.iter().map(|p| p.name()).collect();
        assert_eq!(names, ["score", "name", "id"]);

        let flags: Vec<_> = plan.iter().map(|p| p.is_assignable()).collect();
        assert_eq!(flags, [false, true, true]);
    }

    #[test]
    fn cache_builds_once_per_pair() {
        let cache = PlanCache::new();
        assert!(cache.is_empty());

        let a = cache.get_or_build(Left::bean_info(), Right::bean_info());
        let b = cache.get_or_build(Left::bean_info(), Right::bean_info());
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);

        // Direction matters.
        let c = cache.get_or_build(Right::bean_info(), Left::bean_info());
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(cache.len(), 2);

        assert!(cache.get(TypeId::of::<Left>(), TypeId::of::<Right>()).is_some());
        assert!(cache.get(TypeId::of::<Left>(), TypeId::of::<Left>()).is_none());
    }

    #[test]
    fn concurrent_builders_agree() {
        let cache = PlanCache::new();
        let plans: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| cache.get_or_build(Left::bean_info(), Right::bean_info())))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(cache.len(), 1);
        let first = cache.get(TypeId::of::<Left>(), TypeId::of::<Right>()).unwrap();
        assert!(plans.iter().all(|plan| Arc::ptr_eq(plan, &first)));
    }
}
