use bm_reflect::Bean;

use crate::{DefaultConstructor, InstanceProvider, Mapper, PlanCache};

/// Mapper without converters.
///
/// A property is copied only when its declared source type is assignable to
/// its declared target type, decided once per plan. Every other property is
/// skipped and keeps its current value on the target.
///
/// Each instance owns its plan cache. [`BeanUtils::shared`] returns a
/// process-wide instance.
///
/// # Examples
///
/// ```
/// use bm_convert::{BeanUtils, Mapper};
/// use bm_reflect::Bean;
///
/// #[derive(Bean)]
/// struct Draft {
///     title: String,
///     words: u32,
/// }
///
/// #[derive(Default, Bean)]
/// #[bean(default)]
/// struct Summary {
///     title: Option<String>,
///     words: u64,
/// }
///
/// let draft = Draft { title: "Notes".into(), words: 120 };
/// let summary: Summary = BeanUtils::shared().convert(&draft).unwrap();
///
/// assert_eq!(summary.title.as_deref(), Some("Notes"));
/// // `u32` is not assignable to `u64`: skipped.
/// assert_eq!(summary.words, 0);
/// ```
#[derive(Debug, Default)]
pub struct BeanUtils {
    plans: PlanCache,
}

impl BeanUtils {
    pub const fn new() -> Self {
        Self {
            plans: PlanCache::new(),
        }
    }

    /// The process-wide instance.
    pub fn shared() -> &'static BeanUtils {
        static SHARED: BeanUtils = BeanUtils::new();
        &SHARED
    }

    #[inline]
    pub fn plan_cache(&self) -> &PlanCache {
        &self.plans
    }
}

impl Mapper for BeanUtils {
    fn copy_properties(&self, source: &dyn Bean, target: &mut dyn Bean) {
        let plan = self
            .plans
            .get_or_build(source.reflect_bean_info(), target.reflect_bean_info());

        for pair in plan.iter().filter(|pair| pair.is_assignable()) {
            pair.write(target, pair.source().get(source));
        }
    }

    #[inline]
    fn instance_provider(&self) -> &dyn InstanceProvider {
        &DefaultConstructor
    }
}

#[cfg(test)]
mod tests {
    use super::BeanUtils;
    use crate::Mapper;
    use alloc::string::String;
    use bm_reflect::Bean;

    #[derive(Clone, Debug, Default, PartialEq, Bean)]
    #[bean(default)]
    struct Profile {
        nickname: Option<String>,
        level: u8,
        active: bool,
    }

    #[derive(Debug, Default, PartialEq, Bean)]
    #[bean(default)]
    struct ProfileView {
        nickname: Option<String>,
        level: i32,
        active: Option<bool>,
        note: String,
    }

    #[test]
    fn identical_types_copy_field_by_field() {
        let source = Profile {
            nickname: Some(String::from("neo")),
            level: 7,
            active: true,
        };
        let mut target = Profile::default();

        let utils = BeanUtils::new();
        utils.copy_properties(&source, &mut target);
        assert_eq!(target, source);
        assert_eq!(utils.plan_cache().len(), 1);
    }

    #[test]
    fn incompatible_properties_are_skipped() {
        let source = Profile {
            nickname: None,
            level: 7,
            active: true,
        };
        let mut target = ProfileView {
            nickname: Some(String::from("old")),
            level: 42,
            active: None,
            note: String::from("kept"),
        };

        BeanUtils::new().copy_properties(&source, &mut target);

        // Absence still propagates on copied pairs.
        assert_eq!(target.nickname, None);
        // `u8` is not assignable to `i32`: untouched.
        assert_eq!(target.level, 42);
        assert_eq!(target.active, Some(true));
        assert_eq!(target.note, "kept");
    }

    #[test]
    fn shared_instance_is_unique() {
        assert!(core::ptr::eq(BeanUtils::shared(), BeanUtils::shared()));
    }
}
