use bigdecimal::BigDecimal;

impl_opaque! {
    BigDecimal => "bigdecimal::BigDecimal" as "BigDecimal",
}
