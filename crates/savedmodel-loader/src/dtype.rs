use savedmodel_core::{DType, Error, Result};
use savedmodel_proto::DataType;

/// Symbolic `DT_*` name for a raw dtype code.
pub fn native_dtype_name(code: i32) -> Result<&'static str> {
    let dtype = DataType::try_from(code).map_err(|_| Error::UnknownDtype { code })?;
    Ok(dtype.as_str_name())
}

/// Map a raw dtype code from the descriptor to the portable dtype.
pub fn map_native_dtype(code: i32) -> Result<DType> {
    let dtype = DataType::try_from(code).map_err(|_| Error::UnknownDtype { code })?;
    portable_dtype(dtype).ok_or_else(|| Error::UnsupportedDtype {
        name: dtype.as_str_name().to_string(),
    })
}

fn portable_dtype(dtype: DataType) -> Option<DType> {
    use DataType::*;

    match dtype {
        DtFloat => Some(DType::Float32),
        DtInt32 | DtInt64 | DtUint8 => Some(DType::Int32),
        DtBool => Some(DType::Bool),
        DtComplex64 => Some(DType::Complex64),
        DtString => Some(DType::String),
        DtInvalid | DtDouble | DtInt16 | DtInt8 | DtQint8 | DtQuint8 | DtQint32 | DtBfloat16
        | DtQint16 | DtQuint16 | DtUint16 | DtComplex128 | DtHalf | DtResource | DtVariant
        | DtUint32 | DtUint64 | DtFloat8E5m2 | DtFloat8E4m3fn | DtInt4 | DtUint4 => None,
        DtFloatRef | DtDoubleRef | DtInt32Ref | DtUint8Ref | DtInt16Ref | DtInt8Ref
        | DtStringRef | DtComplex64Ref | DtInt64Ref | DtBoolRef | DtQint8Ref | DtQuint8Ref
        | DtQint32Ref | DtBfloat16Ref | DtQint16Ref | DtQuint16Ref | DtUint16Ref
        | DtComplex128Ref | DtHalfRef | DtResourceRef | DtVariantRef | DtUint32Ref
        | DtUint64Ref | DtFloat8E5m2Ref | DtFloat8E4m3fnRef | DtInt4Ref | DtUint4Ref => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_supported_codes() {
        assert_eq!(map_native_dtype(DataType::DtFloat as i32).ok(), Some(DType::Float32));
        assert_eq!(map_native_dtype(DataType::DtInt64 as i32).ok(), Some(DType::Int32));
        assert_eq!(map_native_dtype(DataType::DtUint8 as i32).ok(), Some(DType::Int32));
        assert_eq!(map_native_dtype(DataType::DtBool as i32).ok(), Some(DType::Bool));
        assert_eq!(map_native_dtype(DataType::DtComplex64 as i32).ok(), Some(DType::Complex64));
        assert_eq!(map_native_dtype(DataType::DtString as i32).ok(), Some(DType::String));
    }

    #[test]
    fn every_defined_code_either_maps_or_is_unsupported() {
        for code in (0..=25).chain([29, 30]).chain(101..=125).chain([129, 130]) {
            match map_native_dtype(code) {
                Ok(_) | Err(Error::UnsupportedDtype { .. }) => {}
                Err(e) => panic!("code {code}: {e}"),
            }
        }
    }

    #[test]
    fn undefined_code_is_unknown() {
        let err = map_native_dtype(77).unwrap_err();
        assert!(matches!(err, Error::UnknownDtype { code: 77 }));
        assert!(err.to_string().contains("77"));
    }

    #[test]
    fn half_is_unsupported_by_name() {
        let err = map_native_dtype(DataType::DtHalf as i32).unwrap_err();
        assert!(err.to_string().contains("DT_HALF"), "{err}");
    }

    #[test]
    fn narrow_float_and_int4_codes_are_unsupported() {
        for (code, name) in [
            (24, "DT_FLOAT8_E5M2"),
            (25, "DT_FLOAT8_E4M3FN"),
            (29, "DT_INT4"),
            (130, "DT_UINT4_REF"),
        ] {
            match map_native_dtype(code) {
                Err(Error::UnsupportedDtype { name: got }) => assert_eq!(got, name),
                other => panic!("code {code}: {other:?}"),
            }
        }
        assert!(matches!(
            map_native_dtype(26),
            Err(Error::UnknownDtype { code: 26 })
        ));
    }
}
