use alloc::boxed::Box;
use alloc::vec::Vec;

use bm_reflect::{Bean, PropertyType};

use crate::{ConverterRegistry, DefaultConstructor, InstanceProvider, Mapper, PlanCache};
use crate::{ResolvedConverter, TypeConverter, resolve};

// -----------------------------------------------------------------------------
// BeanConverter

/// Mapper with user-supplied type converters.
///
/// For every property shared by source and target:
///
/// - a value whose runtime type is assignable to the target property is copied as is,
/// - otherwise the earliest registered converter accepting the value and
///   producing an assignable type is applied,
/// - otherwise the target property is left absent.
///
/// The converter owns its registry, its plan cache and its instance provider.
/// It is `Send + Sync` and meant to be shared.
///
/// # Examples
///
/// ```
/// use bm_convert::{BeanConverter, Mapper};
/// use bm_reflect::{Bean, Opaque};
///
/// #[derive(Clone, Copy, Opaque)]
/// enum Status {
///     Active,
///     Disabled,
/// }
///
/// #[derive(Bean)]
/// struct Account {
///     login: String,
///     status: Option<Status>,
/// }
///
/// #[derive(Default, Bean)]
/// #[bean(default)]
/// struct AccountRow {
///     login: String,
///     status: i32,
/// }
///
/// let converter = BeanConverter::builder()
///     .register_converter(|s: Status| s as i32)
///     .build();
///
/// let account = Account { login: "ann".into(), status: Some(Status::Disabled) };
/// let row: AccountRow = converter.convert(&account).unwrap();
///
/// assert_eq!(row.login, "ann");
/// assert_eq!(row.status, 1);
/// ```
pub struct BeanConverter {
    registry: ConverterRegistry,
    plans: PlanCache,
    provider: Box<dyn InstanceProvider>,
}

impl BeanConverter {
    #[inline]
    pub fn builder() -> BeanConverterBuilder {
        BeanConverterBuilder::new()
    }

    #[inline]
    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    #[inline]
    pub fn plan_cache(&self) -> &PlanCache {
        &self.plans
    }
}

impl Default for BeanConverter {
    fn default() -> Self {
        BeanConverterBuilder::new().build()
    }
}

impl core::fmt::Debug for BeanConverter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BeanConverter")
            .field("registry", &self.registry)
            .field("plans", &self.plans)
            .finish_non_exhaustive()
    }
}

impl Mapper for BeanConverter {
    fn copy_properties(&self, source: &dyn Bean, target: &mut dyn Bean) {
        let plan = self
            .plans
            .get_or_build(source.reflect_bean_info(), target.reflect_bean_info());

        for pair in plan.iter() {
            let value = pair.source().get(source);
            let resolved = resolve(value, pair.target().type_desc(), &self.registry);
            pair.write(target, resolved);
        }
    }

    #[inline]
    fn instance_provider(&self) -> &dyn InstanceProvider {
        &*self.provider
    }
}

// -----------------------------------------------------------------------------
// BeanConverterBuilder

/// Collects converters, then freezes them into a [`BeanConverter`].
pub struct BeanConverterBuilder {
    converters: Vec<ResolvedConverter>,
    provider: Option<Box<dyn InstanceProvider>>,
}

impl BeanConverterBuilder {
    pub fn new() -> Self {
        Self {
            converters: Vec::new(),
            provider: None,
        }
    }

    /// Registers a converter. Its source and target types are `S` and `T`.
    ///
    /// Registration order is the precedence order among converters that
    /// match the same property.
    pub fn register_converter<S, T, C>(self, converter: C) -> Self
    where
        S: PropertyType,
        T: PropertyType,
        C: TypeConverter<S, T>,
    {
        self.register(ResolvedConverter::new(converter))
    }

    /// Registers an already erased converter.
    pub fn register(mut self, converter: ResolvedConverter) -> Self {
        self.converters.push(converter);
        self
    }

    /// Replaces the [`DefaultConstructor`] provider.
    pub fn instance_provider(mut self, provider: impl InstanceProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    pub fn build(self) -> BeanConverter {
        let registry = ConverterRegistry::new(self.converters);
        log::debug!(
            "bean converter built with {} converters in {} source groups",
            registry.len(),
            registry.group_count()
        );

        BeanConverter {
            registry,
            plans: PlanCache::new(),
            provider: self.provider.unwrap_or_else(|| Box::new(DefaultConstructor)),
        }
    }
}

impl Default for BeanConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::BeanConverter;
    use crate::{Argument, ConvertError, Mapper};
    use alloc::boxed::Box;
    use alloc::format;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use bigdecimal::BigDecimal;
    use bm_reflect::{Bean, Describe, InstantiateError, Introspect, Opaque, Value};
    use core::str::FromStr;
    use core::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Copy, Debug, PartialEq, Opaque)]
    #[bean(debug)]
    enum Gender {
        Male,
        Female,
    }

    #[derive(Bean)]
    struct Person {
        name: Option<String>,
        age: Option<i32>,
        gender: Option<Gender>,
        height: Option<f64>,
        wealth: Option<BigDecimal>,
    }

    #[derive(Debug, Default, Bean)]
    #[bean(default)]
    struct PersonDto {
        name: Option<String>,
        age: i32,
        gender: i32,
        height: Option<BigDecimal>,
        wealth: Option<String>,
    }

    fn peter() -> Person {
        Person {
            name: Some(String::from("Peter")),
            age: Some(34),
            gender: Some(Gender::Male),
            height: Some(1.85),
            wealth: Some(BigDecimal::from_str("123456789.87654321").unwrap()),
        }
    }

    fn person_converter() -> BeanConverter {
        BeanConverter::builder()
            .register_converter(|g: Gender| g as i32)
            .register_converter(|h: f64| h.to_string().parse::<BigDecimal>().ok())
            .register_converter(|d: BigDecimal| d.to_string())
            .build()
    }

    #[test]
    fn person_to_dto() {
        let converter = person_converter();
        let dto: PersonDto = converter.convert(&peter()).unwrap();

        assert_eq!(dto.name.as_deref(), Some("Peter"));
        assert_eq!(dto.age, 34);
        assert_eq!(dto.gender, 0);
        assert_eq!(dto.height, Some(BigDecimal::from_str("1.85").unwrap()));

        let wealth = BigDecimal::from_str(dto.wealth.as_deref().unwrap()).unwrap();
        assert_eq!(wealth, BigDecimal::from_str("123456789.87654321").unwrap());
    }

    #[test]
    fn converter_result_is_copied() {
        let converter = person_converter();
        let mut source = peter();
        source.gender = Some(Gender::Female);
        let mut target = PersonDto::default();
        converter.copy_properties(&source, &mut target);
        assert_eq!(target.gender, Gender::Female as i32);
    }

    #[test]
    fn null_source_fails_before_mutation() {
        let converter = person_converter();
        let mut target = PersonDto {
            age: 99,
            ..PersonDto::default()
        };

        let err = converter.try_copy_properties(None, Some(&mut target)).unwrap_err();
        assert_eq!(err, ConvertError::NullArgument(Argument::Source));
        assert_eq!(target.age, 99);

        let err = converter.try_copy_properties(Some(&peter()), None).unwrap_err();
        assert_eq!(err, ConvertError::NullArgument(Argument::Target));

        converter
            .try_copy_properties(Some(&peter()), Some(&mut target))
            .unwrap();
        assert_eq!(target.age, 34);
    }

    #[derive(Bean)]
    struct NoDefault {
        name: Option<String>,
    }

    #[test]
    fn target_without_default_constructor() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        let converter = BeanConverter::builder()
            .register_converter(|s: String| {
                CALLS.fetch_add(1, Ordering::Relaxed);
                s
            })
            .build();

        let err = converter.convert::<NoDefault>(&peter()).err();
        assert!(matches!(
            err,
            Some(ConvertError::Instantiation(InstantiateError::NoDefault { .. }))
        ));
        assert!(converter.plan_cache().is_empty());
        assert_eq!(CALLS.load(Ordering::Relaxed), 0);

        let err = converter.convert_to(&peter(), i32::type_desc()).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Instantiation(InstantiateError::NotABean { .. })
        ));
    }

    #[test]
    fn absence_propagates() {
        let converter = person_converter();
        let source = Person {
            name: None,
            age: None,
            gender: None,
            height: None,
            wealth: None,
        };
        let mut target = PersonDto {
            name: Some(String::from("x")),
            age: 5,
            gender: 1,
            height: Some(BigDecimal::from(2)),
            wealth: Some(String::from("y")),
        };
        converter.copy_properties(&source, &mut target);

        assert_eq!(target.name, None);
        assert_eq!(target.age, 0);
        assert_eq!(target.gender, 0);
        assert_eq!(target.height, None);
        assert_eq!(target.wealth, None);
    }

    #[derive(Bean)]
    struct Measurement {
        label: Option<String>,
        reading: Option<f64>,
        unit: char,
    }

    #[derive(Default, Bean)]
    #[bean(default)]
    struct MeasurementRow {
        label: Option<String>,
        reading: Option<i64>,
        unit: Option<String>,
    }

    #[test]
    fn unmapped_properties_become_absent() {
        let converter = BeanConverter::default();
        let source = Measurement {
            label: Some(String::from("t1")),
            reading: Some(21.5),
            unit: 'C',
        };
        let mut target = MeasurementRow {
            label: None,
            reading: Some(7),
            unit: Some(String::from("F")),
        };
        converter.copy_properties(&source, &mut target);

        assert_eq!(target.label.as_deref(), Some("t1"));
        assert_eq!(target.reading, None);
        assert_eq!(target.unit, None);
    }

    #[test]
    fn idempotent_and_deterministic_under_caching() {
        let source = peter();

        let cold = person_converter();
        let mut once = PersonDto::default();
        cold.copy_properties(&source, &mut once);
        assert_eq!(cold.plan_cache().len(), 1);

        let mut twice = PersonDto::default();
        cold.copy_properties(&source, &mut twice);
        cold.copy_properties(&source, &mut twice);
        assert_eq!(cold.plan_cache().len(), 1);

        assert_eq!(format!("{once:?}"), format!("{twice:?}"));
    }

    #[test]
    fn source_is_not_modified() {
        let converter = person_converter();
        let source = peter();
        let _: PersonDto = converter.convert(&source).unwrap();
        assert_eq!(source.name.as_deref(), Some("Peter"));
        assert_eq!(source.gender, Some(Gender::Male));
        assert_eq!(source.height, Some(1.85));
    }

    #[test]
    fn earliest_converter_wins() {
        let converter = BeanConverter::builder()
            .register_converter(|h: f64| format!("first {h}"))
            .register_converter(|h: f64| format!("second {h}"))
            .build();

        #[derive(Bean)]
        struct Src {
            v: f64,
        }
        #[derive(Default, Bean)]
        #[bean(default)]
        struct Dst {
            v: String,
        }

        let dst: Dst = converter.convert(&Src { v: 1.5 }).unwrap();
        assert_eq!(dst.v, "first 1.5");
    }

    #[derive(Clone, Debug, PartialEq, Opaque)]
    #[bean(debug, extends(Money))]
    struct Cents(i64);

    #[derive(Clone, Debug, PartialEq, Opaque)]
    #[bean(debug)]
    struct Money {
        cents: i64,
    }

    impl From<Cents> for Money {
        fn from(c: Cents) -> Self {
            Money { cents: c.0 }
        }
    }

    #[derive(Bean)]
    struct Invoice {
        total: Cents,
        tax: Option<Cents>,
    }

    #[derive(Debug, Default, Bean)]
    #[bean(default)]
    struct InvoiceView {
        total: Option<Money>,
        tax: Option<String>,
    }

    #[test]
    fn subtypes_are_upcast_and_converters_match_supertypes() {
        let converter = BeanConverter::builder()
            .register_converter(|m: Money| format!("{}.{:02}", m.cents / 100, m.cents % 100))
            .build();

        let view: InvoiceView = converter
            .convert(&Invoice {
                total: Cents(1250),
                tax: Some(Cents(305)),
            })
            .unwrap();

        assert_eq!(view.total, Some(Money { cents: 1250 }));
        assert_eq!(view.tax.as_deref(), Some("3.05"));
    }

    #[derive(Bean)]
    struct Dynamic {
        payload: Value,
        extra: Option<Value>,
    }

    #[derive(Default, Bean)]
    #[bean(default)]
    struct Typed {
        payload: u16,
        extra: Option<i32>,
    }

    #[test]
    fn dynamic_properties_are_resolved_at_runtime() {
        let converter = BeanConverter::builder()
            .register_converter(|s: String| s.len() as i32)
            .build();
        let typed: Typed = converter
            .convert(&Dynamic {
                payload: Value::new(8_u16),
                extra: Some(Value::new(String::from("four"))),
            })
            .unwrap();
        assert_eq!(typed.payload, 8);
        assert_eq!(typed.extra, Some(4));

        let typed: Typed = converter
            .convert(&Dynamic {
                payload: Value::new(8_u8),
                extra: None,
            })
            .unwrap();
        assert_eq!(typed.payload, 0);
        assert_eq!(typed.extra, None);
    }

    #[test]
    fn custom_instance_provider() {
        let converter = BeanConverter::builder()
            .instance_provider(|info: &'static bm_reflect::BeanInfo| {
                if info.type_desc().is::<PersonDto>() {
                    Ok(Box::new(PersonDto {
                        age: -1,
                        ..PersonDto::default()
                    }) as Box<dyn Bean>)
                } else {
                    info.instantiate()
                }
            })
            .build();

        let dto: PersonDto = converter.convert(&NoDefault { name: None }).unwrap();
        assert_eq!(dto.age, -1);

        let wrong = BeanConverter::builder()
            .instance_provider(|_: &'static bm_reflect::BeanInfo| {
                Ok(Box::new(PersonDto::default()) as Box<dyn Bean>)
            })
            .build();
        let err = wrong.convert::<MeasurementRow>(&peter()).err();
        assert!(matches!(err, Some(ConvertError::TypeMismatch { .. })));
    }

    #[test]
    fn plans_are_cached_per_type_pair() {
        let converter = person_converter();
        let _: PersonDto = converter.convert(&peter()).unwrap();
        let _: PersonDto = converter.convert(&peter()).unwrap();
        let _: MeasurementRow = converter.convert(&peter()).unwrap();
        assert_eq!(converter.plan_cache().len(), 2);

        // Each converter owns its cache.
        assert!(person_converter().plan_cache().is_empty());
        assert_eq!(PersonDto::bean_info().len(), 5);
    }

    #[test]
    fn shared_between_threads() {
        let converter = person_converter();
        let results: Vec<PersonDto> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| converter.convert::<PersonDto>(&peter()).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(results.iter().all(|dto| dto.age == 34 && dto.gender == 0));
        assert_eq!(converter.plan_cache().len(), 1);
    }
}
