#[cfg(test)]
#[generic_tests::define]
mod generictests {
    use num::NumCast;

    use crate::{
        Cell, DenseRaster, Error, MaskedRaster, Raster, RasterAlgebra, RasterMetadata, RasterNum, RasterSize, SparseRaster, Widest,
        testutils::{NOD, create_vec, to_f64},
    };

    const META: RasterMetadata = RasterMetadata::sized_with_nodata(RasterSize::with_rows_cols(3, 3), Some(NOD));

    fn create<T: RasterNum, R: Raster<Pixel = T>>(data: &[f64]) -> R {
        R::from_vec(META, create_vec(data)).unwrap()
    }

    fn scalar<T: RasterNum>(value: i32) -> T {
        NumCast::from(value).unwrap()
    }

    #[test]
    fn value_iteration_skips_nodata<T: RasterNum, R: Raster<Pixel = T>>() {
        #[rustfmt::skip]
        let raster = create::<T, R>(&[
            NOD, 1.0, 2.0,
            5.0, NOD, 7.0,
            4.0, 3.0, NOD,
        ]);

        let expected = create_vec::<T>(&[1.0, 2.0, 5.0, 7.0, 4.0, 3.0]);
        assert_eq!(raster.value_iter().collect::<Vec<_>>(), expected);
        assert_eq!(raster.value_iter().collect::<Vec<_>>(), expected);
        assert_eq!(raster.value_iter().count(), raster.len() - raster.nodata_count());
        assert_eq!(raster.nodata_count(), 3);
        assert!(raster.has_nodata());
    }

    #[test]
    fn cell_queries<T: RasterNum, R: Raster<Pixel = T>>() {
        let mut raster = create::<T, R>(&[NOD, 1.0, 2.0, 5.0, NOD, 7.0, 4.0, 3.0, NOD]);

        assert!(raster.cell_is_nodata(Cell::from_row_col(1, 1)));
        assert_eq!(raster.cell_value(Cell::from_row_col(1, 2)), Some(scalar(7)));
        assert_eq!(raster.nodata(), Some(scalar(255)));

        raster.set_cell_value(Cell::from_row_col(1, 1), Some(scalar(6)));
        raster.mark_cell_as_nodata(Cell::from_row_col(0, 1));
        assert_eq!(
            to_f64(raster.iter_opt()),
            vec![None, None, Some(2.0), Some(5.0), Some(6.0), Some(7.0), Some(4.0), Some(3.0), None]
        );

        assert_eq!(raster.cells().count(), 9);
        assert_eq!(raster.cells().last(), Some(Cell::from_row_col(2, 2)));
    }

    #[test]
    fn construction<T: RasterNum, R: Raster<Pixel = T>>() {
        let raster = R::filled_with(META, scalar(4)).unwrap();
        assert_eq!(raster.value_iter().count(), 9);

        let raster = R::filled_with(META, scalar(255)).unwrap();
        assert_eq!(raster.nodata_count(), 9);

        let raster = R::filled_with_nodata(META).unwrap();
        assert_eq!(raster.value_iter().count(), 0);

        let raster = R::from_iter(META, (0..9).map(|i| if i % 3 == 0 { None } else { Some(scalar::<T>(i)) })).unwrap();
        assert_eq!(to_f64(raster.iter_opt()), vec![None, Some(1.0), Some(2.0), None, Some(4.0), Some(5.0), None, Some(7.0), Some(8.0)]);

        assert!(R::from_vec(META, create_vec(&[1.0, 2.0])).is_err());
        assert!(R::from_iter(META, std::iter::once(Some(scalar::<T>(1)))).is_err());
    }

    #[test]
    fn add_nodata<T: RasterNum, R: Raster<Pixel = T> + std::fmt::Debug + PartialEq>()
    where
        for<'a> &'a R: std::ops::Add<&'a R, Output = R>,
        R: std::ops::Add<R, Output = R>,
    {
        let raster1 = create::<T, R>(&[NOD, 2.0, 2.0, 3.0, NOD, 3.0, 1.0, 1.0, 0.0]);
        let raster2 = create::<T, R>(&[1.0, 3.0, 3.0, 3.0, NOD, 3.0, 3.0, 3.0, NOD]);
        let expected = create::<T, R>(&[NOD, 5.0, 5.0, 6.0, NOD, 6.0, 4.0, 4.0, NOD]);

        {
            let result = &raster1 + &raster2;
            assert_eq!(result, expected);
        }

        {
            let result = raster1 + raster2;
            assert_eq!(result, expected);
        }
    }

    #[test]
    fn subtract_nodata<T: RasterNum, R: Raster<Pixel = T> + std::fmt::Debug + PartialEq>()
    where
        for<'a> &'a R: std::ops::Sub<&'a R, Output = R>,
    {
        let raster1 = create::<T, R>(&[NOD, 2.0, 2.0, 3.0, NOD, 3.0, 1.0, 1.0, 0.0]);
        let raster2 = create::<T, R>(&[1.0, 3.0, 1.0, 3.0, NOD, 3.0, 3.0, 0.0, NOD]);
        let expected = create::<T, R>(&[NOD, -1.0, 1.0, 0.0, NOD, 0.0, -2.0, 1.0, NOD]);

        assert_eq!(&raster1 - &raster2, expected);
    }

    #[test]
    fn multiply_nodata<T: RasterNum, R: Raster<Pixel = T> + std::fmt::Debug + PartialEq>()
    where
        for<'a> &'a R: std::ops::Mul<&'a R, Output = R>,
        R: std::ops::Mul<R, Output = R>,
    {
        let raster1 = create::<T, R>(&[NOD, 2.0, 2.0, 3.0, NOD, 3.0, 1.0, 1.0, 0.0]);
        let raster2 = create::<T, R>(&[1.0, 3.0, 3.0, 3.0, NOD, 3.0, 3.0, 3.0, NOD]);
        let expected = create::<T, R>(&[NOD, 6.0, 6.0, 9.0, NOD, 9.0, 3.0, 3.0, NOD]);

        assert_eq!(&raster1 * &raster2, expected);
        assert_eq!(raster1 * raster2, expected);
    }

    #[test]
    fn divide_by_zero_is_nodata<T: RasterNum, R: Raster<Pixel = T> + std::fmt::Debug + PartialEq>()
    where
        for<'a> &'a R: std::ops::Div<&'a R, Output = R>,
    {
        let raster1 = create::<T, R>(&[NOD, 6.0, 4.0, 3.0, NOD, 9.0, 4.0, 1.0, 0.0]);
        let raster2 = create::<T, R>(&[1.0, 3.0, 0.0, 3.0, NOD, 3.0, 2.0, 0.0, 1.0]);
        let expected = create::<T, R>(&[NOD, 2.0, NOD, 1.0, NOD, 3.0, 2.0, NOD, 0.0]);

        let result = &raster1 / &raster2;
        assert_eq!(result, expected);
        assert!(result.is_nodata(2));
        assert!(!raster2.is_nodata(2));
    }

    #[test]
    fn size_mismatch<T: RasterNum + Widest<T>, R: Raster<Pixel = T>>() {
        let raster1 = create::<T, R>(&[1.0; 9]);
        let raster2 = R::filled_with(RasterMetadata::sized_with_nodata(RasterSize::with_rows_cols(1, 9), Some(NOD)), scalar(1)).unwrap();

        assert!(matches!(raster1.add_raster(&raster2), Err(Error::SizeMismatch { .. })));
        assert!(matches!(raster1.div_raster(&raster2), Err(Error::SizeMismatch { .. })));
        assert!(matches!(raster1.less(&raster2), Err(Error::SizeMismatch { .. })));
        assert!(matches!(raster1.logical_or(&raster2), Err(err) if err.is_invalid_argument()));
    }

    #[test]
    #[should_panic]
    fn size_mismatch_operator<T: RasterNum, R: Raster<Pixel = T>>()
    where
        for<'a> &'a R: std::ops::Add<&'a R, Output = R>,
    {
        let raster1 = create::<T, R>(&[1.0; 9]);
        let raster2 = R::filled_with(RasterMetadata::sized_with_nodata(RasterSize::with_rows_cols(9, 1), Some(NOD)), scalar(1)).unwrap();
        let _ = &raster1 + &raster2;
    }

    #[test]
    fn scalar_operations<T: RasterNum, R: Raster<Pixel = T> + std::fmt::Debug + PartialEq>()
    where
        for<'a> &'a R: std::ops::Mul<T, Output = R> + std::ops::Add<T, Output = R> + std::ops::Sub<T, Output = R> + std::ops::Div<T, Output = R>,
        R: std::ops::Mul<T, Output = R>,
        T: Widest<T, Output = T>,
    {
        let raster = create::<T, R>(&[1.0, 2.0, NOD, 4.0, 0.0, 5.0, 8.0, 10.0, NOD]);

        assert_eq!(&raster * scalar::<T>(2), create::<T, R>(&[2.0, 4.0, NOD, 8.0, 0.0, 10.0, 16.0, 20.0, NOD]));
        assert_eq!(&raster + scalar::<T>(1), create::<T, R>(&[2.0, 3.0, NOD, 5.0, 1.0, 6.0, 9.0, 11.0, NOD]));
        assert_eq!(&raster - scalar::<T>(1), create::<T, R>(&[0.0, 1.0, NOD, 3.0, -1.0, 4.0, 7.0, 9.0, NOD]));
        assert_eq!(
            to_f64((&raster / scalar::<T>(2)).iter_opt()),
            to_f64(raster.div_scalar(scalar::<T>(2)).unwrap().iter_opt())
        );

        assert_eq!(
            to_f64(raster.scalar_sub(scalar::<T>(10)).unwrap().iter_opt()),
            vec![Some(9.0), Some(8.0), None, Some(6.0), Some(10.0), Some(5.0), Some(2.0), Some(0.0), None]
        );

        assert_eq!(
            to_f64(raster.scalar_div(scalar::<T>(40)).unwrap().iter_opt()),
            vec![Some(40.0), Some(20.0), None, Some(10.0), None, Some(8.0), Some(5.0), Some(4.0), None]
        );

        assert!(matches!(raster.div_scalar(scalar::<T>(0)), Err(Error::InvalidArgument(_))));
        assert_eq!(raster * scalar::<T>(1), create::<T, R>(&[1.0, 2.0, NOD, 4.0, 0.0, 5.0, 8.0, 10.0, NOD]));
    }

    #[test]
    fn scalar_of_other_type<T: RasterNum + Widest<f64>, R: Raster<Pixel = T>>() {
        let raster = create::<T, R>(&[1.0, 2.0, NOD, 4.0, 0.0, 6.0, 8.0, 10.0, NOD]);
        let result = raster.add_scalar(0.5f64).unwrap();

        assert_eq!(<crate::WidestType<T, f64> as RasterNum>::TYPE, crate::RasterDataType::Float64);
        assert_eq!(
            to_f64(result.iter_opt()),
            vec![Some(1.5), Some(2.5), None, Some(4.5), Some(0.5), Some(6.5), Some(8.5), Some(10.5), None]
        );
    }

    #[test]
    fn negation<T: RasterNum, R: Raster<Pixel = T> + std::fmt::Debug + PartialEq>()
    where
        for<'a> &'a R: std::ops::Neg<Output = R>,
    {
        let raster = create::<T, R>(&[1.0, -2.0, NOD, 4.0, 0.0, 6.0, 8.0, 10.0, NOD]);
        assert_eq!(-&raster, create::<T, R>(&[-1.0, 2.0, NOD, -4.0, 0.0, -6.0, -8.0, -10.0, NOD]));
    }

    #[test]
    fn comparisons<T: RasterNum + Widest<T>, R: Raster<Pixel = T>>() {
        let raster1 = create::<T, R>(&[NOD, 2.0, 2.0, 3.0, NOD, 3.0, 1.0, 1.0, 0.0]);
        let raster2 = create::<T, R>(&[1.0, 3.0, 2.0, 1.0, NOD, 3.0, 3.0, 0.0, NOD]);

        let check = |result: R::WithPixelType<u8>, expected: [Option<f64>; 9]| {
            assert_eq!(result.metadata().nodata, Some(255.0));
            assert_eq!(to_f64(result.iter_opt()), expected.to_vec());
        };

        check(
            raster1.equal_to(&raster2).unwrap(),
            [None, Some(0.0), Some(1.0), Some(0.0), None, Some(1.0), Some(0.0), Some(0.0), None],
        );
        check(
            raster1.not_equal_to(&raster2).unwrap(),
            [None, Some(1.0), Some(0.0), Some(1.0), None, Some(0.0), Some(1.0), Some(1.0), None],
        );
        check(
            raster1.less(&raster2).unwrap(),
            [None, Some(1.0), Some(0.0), Some(0.0), None, Some(0.0), Some(1.0), Some(0.0), None],
        );
        check(
            raster1.less_equal(&raster2).unwrap(),
            [None, Some(1.0), Some(1.0), Some(0.0), None, Some(1.0), Some(1.0), Some(0.0), None],
        );
        check(
            raster1.greater(&raster2).unwrap(),
            [None, Some(0.0), Some(0.0), Some(1.0), None, Some(0.0), Some(0.0), Some(1.0), None],
        );
        check(
            raster1.greater_equal(&raster2).unwrap(),
            [None, Some(0.0), Some(1.0), Some(1.0), None, Some(1.0), Some(0.0), Some(1.0), None],
        );

        check(
            raster1.greater_scalar(scalar::<T>(2)).unwrap(),
            [None, Some(0.0), Some(0.0), Some(1.0), None, Some(1.0), Some(0.0), Some(0.0), Some(0.0)],
        );
        check(
            raster1.less_equal_scalar(scalar::<T>(2)).unwrap(),
            [None, Some(1.0), Some(1.0), Some(0.0), None, Some(0.0), Some(1.0), Some(1.0), Some(1.0)],
        );
        check(
            raster1.equal_to_scalar(scalar::<T>(3)).unwrap(),
            [None, Some(0.0), Some(0.0), Some(1.0), None, Some(1.0), Some(0.0), Some(0.0), Some(0.0)],
        );
        check(
            raster1.not_equal_to_scalar(scalar::<T>(3)).unwrap(),
            [None, Some(1.0), Some(1.0), Some(0.0), None, Some(0.0), Some(1.0), Some(1.0), Some(1.0)],
        );
        check(
            raster1.less_scalar(scalar::<T>(1)).unwrap(),
            [None, Some(0.0), Some(0.0), Some(0.0), None, Some(0.0), Some(0.0), Some(0.0), Some(1.0)],
        );
        check(
            raster1.greater_equal_scalar(scalar::<T>(3)).unwrap(),
            [None, Some(0.0), Some(0.0), Some(1.0), None, Some(1.0), Some(0.0), Some(0.0), Some(0.0)],
        );
    }

    #[test]
    fn logical_operations<T: RasterNum + Widest<T>, R: Raster<Pixel = T>>() {
        let raster1 = create::<T, R>(&[0.0, 1.0, 2.0, NOD, 0.0, 3.0, 0.0, 1.0, 1.0]);
        let raster2 = create::<T, R>(&[1.0, 0.0, 3.0, 1.0, NOD, 4.0, 0.0, 1.0, 0.0]);

        assert_eq!(
            to_f64(raster1.logical_and(&raster2).unwrap().iter_opt()),
            vec![Some(0.0), Some(0.0), Some(1.0), None, None, Some(1.0), Some(0.0), Some(1.0), Some(0.0)]
        );
        assert_eq!(
            to_f64(raster1.logical_or(&raster2).unwrap().iter_opt()),
            vec![Some(1.0), Some(1.0), Some(1.0), None, None, Some(1.0), Some(0.0), Some(1.0), Some(1.0)]
        );
        assert_eq!(
            to_f64(raster1.logical_not().unwrap().iter_opt()),
            vec![Some(1.0), Some(0.0), Some(0.0), None, Some(1.0), Some(0.0), Some(1.0), Some(0.0), Some(0.0)]
        );
    }

    #[test]
    fn nodata_propagation<T: RasterNum + Widest<T>, R: Raster<Pixel = T>>() {
        // the values underneath the nodata cells do not influence the result
        let raster1 = create::<T, R>(&[NOD, 1.0, 2.0, NOD, 4.0, 5.0, NOD, 7.0, 8.0]);
        let raster2 = create::<T, R>(&[1.0, NOD, 2.0, 3.0, NOD, 5.0, NOD, 7.0, 8.0]);
        let nodata_cells = [true, true, false, true, true, false, true, false, false];

        let results = [
            to_f64(raster1.add_raster(&raster2).unwrap().iter_opt()),
            to_f64(raster1.sub_raster(&raster2).unwrap().iter_opt()),
            to_f64(raster1.mul_raster(&raster2).unwrap().iter_opt()),
            to_f64(raster1.div_raster(&raster2).unwrap().iter_opt()),
            to_f64(raster1.equal_to(&raster2).unwrap().iter_opt()),
            to_f64(raster1.greater(&raster2).unwrap().iter_opt()),
            to_f64(raster1.logical_and(&raster2).unwrap().iter_opt()),
        ];

        for result in results {
            for (value, nodata) in result.iter().zip(nodata_cells) {
                assert_eq!(value.is_none(), nodata);
            }
        }
    }

    #[test]
    fn nodata_resolution<T: RasterNum + Widest<T>, R: Raster<Pixel = T>>() {
        let raster1 = R::from_vec(RasterMetadata::with_rows_cols(3, 3).with_nodata(Some(NOD)), create_vec(&[1.0; 9])).unwrap();
        let raster2 = R::from_vec(META.with_nodata(Some(0.0)), create_vec(&[1.0; 9])).unwrap();

        assert_eq!(raster1.add_raster(&raster2).unwrap().metadata().nodata, Some(NOD));
        assert_eq!(raster2.add_raster(&raster1).unwrap().metadata().nodata, Some(0.0));
    }

    #[instantiate_tests(<i32, DenseRaster<i32>>)]
    mod denseraster_i32 {}

    #[instantiate_tests(<i64, DenseRaster<i64>>)]
    mod denseraster_i64 {}

    #[instantiate_tests(<f32, DenseRaster<f32>>)]
    mod denseraster_f32 {}

    #[instantiate_tests(<f64, DenseRaster<f64>>)]
    mod denseraster_f64 {}

    #[instantiate_tests(<i32, MaskedRaster<i32>>)]
    mod maskedraster_i32 {}

    #[instantiate_tests(<i64, MaskedRaster<i64>>)]
    mod maskedraster_i64 {}

    #[instantiate_tests(<f32, MaskedRaster<f32>>)]
    mod maskedraster_f32 {}

    #[instantiate_tests(<f64, MaskedRaster<f64>>)]
    mod maskedraster_f64 {}

    #[instantiate_tests(<i32, SparseRaster<i32>>)]
    mod sparseraster_i32 {}

    #[instantiate_tests(<f64, SparseRaster<f64>>)]
    mod sparseraster_f64 {}
}

#[cfg(test)]
mod tests {
    use crate::{
        Cell, DenseRaster, Error, MaskedRaster, Raster, RasterAlgebra, RasterMetadata, RasterSize, SparseRaster,
        testutils::{NOD, create_vec, meta_with_nodata, to_f64},
    };

    const SIZE: RasterSize = RasterSize::with_rows_cols(3, 3);

    #[test]
    fn zero_as_nodata() {
        #[rustfmt::skip]
        let raster = DenseRaster::<i32>::from_vec(meta_with_nodata(SIZE, 0.0), vec![
            0, 1, 2,
            5, 0, 7,
            4, 3, 0,
        ]).unwrap();

        assert_eq!(raster.value_iter().collect::<Vec<_>>(), vec![1, 2, 5, 7, 4, 3]);
        assert_eq!(raster.nodata_count(), 3);
    }

    #[test]
    fn float_nodata_iteration_is_repeatable() {
        let raster = DenseRaster::<f32>::from_vec(RasterMetadata::sized_with_nodata(SIZE, None), vec![f32::NAN, 1.0, 2.0, 3.0, f32::NAN, 5.0, 6.0, 7.0, f32::NAN]).unwrap();

        let first: Vec<f32> = raster.value_iter().collect();
        let second: Vec<f32> = raster.value_iter().collect();
        assert_eq!(first, vec![1.0, 2.0, 3.0, 5.0, 6.0, 7.0]);
        assert_eq!(first, second);
        assert_eq!(raster.nodata_count(), 3);
    }

    #[test]
    fn dense_and_masked_are_equivalent() {
        let data = create_vec::<i32>(&[NOD, 4.0, 0.0, 3.0, NOD, 9.0, 1.0, 8.0, 2.0]);
        let other = create_vec::<i32>(&[1.0, 2.0, 5.0, 0.0, 3.0, NOD, 1.0, 4.0, 2.0]);
        let meta = meta_with_nodata(SIZE, NOD);

        let dense1 = DenseRaster::from_vec(meta.clone(), data.clone()).unwrap();
        let dense2 = DenseRaster::from_vec(meta.clone(), other.clone()).unwrap();
        let masked1 = MaskedRaster::from_vec(meta.clone(), data).unwrap();
        let masked2 = MaskedRaster::from_vec(meta, other).unwrap();

        for index in 0..dense1.len() {
            assert_eq!(dense1.is_nodata(index), masked1.is_nodata(index));
        }

        assert_eq!(to_f64(dense1.iter_opt()), to_f64(masked1.iter_opt()));
        assert_eq!(
            to_f64(dense1.add_raster(&dense2).unwrap().iter_opt()),
            to_f64(masked1.add_raster(&masked2).unwrap().iter_opt())
        );
        assert_eq!(
            to_f64(dense1.div_raster(&dense2).unwrap().iter_opt()),
            to_f64(masked1.div_raster(&masked2).unwrap().iter_opt())
        );
        assert_eq!(
            to_f64(dense1.greater_equal(&dense2).unwrap().iter_opt()),
            to_f64(masked1.greater_equal(&masked2).unwrap().iter_opt())
        );
        assert_eq!(
            to_f64(dense1.add_raster(&masked2).unwrap().iter_opt()),
            to_f64(masked1.add_raster(&dense2).unwrap().iter_opt())
        );
    }

    #[test]
    fn collapse_and_init_round_trip() {
        let meta = meta_with_nodata(SIZE, -1.0);
        let mut raster = DenseRaster::<f64>::from_vec(meta, vec![-1.0, 1.0, 2.0, f64::NAN, 4.0, -1.0, 6.0, 7.0, 8.0]).unwrap();
        let before: Vec<u64> = raster.as_slice().iter().map(|v| v.to_bits()).collect();

        raster.collapse_data();
        assert_eq!(raster.as_slice().iter().filter(|&&v| v == -1.0).count(), 3);
        assert!(raster.as_slice().iter().all(|v| !v.is_nan()));

        raster.init_nodata_values();
        let after: Vec<u64> = raster.as_slice().iter().map(|v| v.to_bits()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn division_by_zero_without_nodata() {
        let meta = RasterMetadata::sized_with_nodata(RasterSize::with_rows_cols(1, 3), None);

        let lhs = DenseRaster::<i32>::from_vec(meta.clone(), vec![1, 2, 3]).unwrap();
        let rhs = DenseRaster::<i32>::from_vec(meta.clone(), vec![1, 0, 3]).unwrap();
        assert!(matches!(lhs.div_raster(&rhs), Err(Error::Runtime(_))));
        assert!(matches!(rhs.scalar_div(6), Err(Error::Runtime(_))));

        // floating point results get NaN as nodata
        let lhs = DenseRaster::<f32>::from_vec(meta.clone(), vec![1.0, 2.0, 3.0]).unwrap();
        let result = lhs.div_raster(&rhs).unwrap();
        assert!(result.metadata().nodata.is_some_and(f64::is_nan));
        assert_eq!(to_f64(result.iter_opt()), vec![Some(1.0), None, Some(1.0)]);

        // the mask can represent nodata without a nodata value
        let lhs = MaskedRaster::<i32>::from_vec(meta.clone(), vec![1, 2, 3]).unwrap();
        let rhs = MaskedRaster::<i32>::from_vec(meta, vec![1, 0, 3]).unwrap();
        let result = lhs.div_raster(&rhs).unwrap();
        assert_eq!(to_f64(result.iter_opt()), vec![Some(1.0), None, Some(1.0)]);
    }

    #[test]
    fn division_error_messages() {
        let meta = RasterMetadata::sized_with_nodata(RasterSize::with_rows_cols(1, 3), None);
        let lhs = DenseRaster::<i32>::from_vec(meta.clone(), vec![4, 6, 8]).unwrap();

        // the nodata cell of the divisor cannot be represented in the result, there is no division by zero
        let masked = MaskedRaster::<i32>::from_vec_with_mask(meta.clone(), vec![2, 3, 4], vec![false, true, false]).unwrap();
        let err = lhs.div_raster(&masked).unwrap_err();
        assert!(matches!(err, Error::Runtime(_)));
        assert!(err.to_string().contains("cannot represent nodata"), "{err}");

        let zeros = DenseRaster::<i32>::from_vec(meta.clone(), vec![2, 0, 4]).unwrap();
        let err = lhs.div_raster(&zeros).unwrap_err();
        assert_eq!(err.to_string(), "Runtime error: Division by zero not possible when resulting raster has no nodata");

        let err = zeros.scalar_div(8).unwrap_err();
        assert_eq!(err.to_string(), "Runtime error: Division by raster that contains 0 values");

        let result = MaskedRaster::<i32>::from_vec(meta, vec![4, 6, 8]).unwrap().div_raster(&masked).unwrap();
        assert_eq!(result.iter_opt().collect::<Vec<_>>(), vec![Some(2), None, Some(2)]);
    }

    #[test]
    fn masked_results_combine_masks() {
        let meta = RasterMetadata::sized_with_nodata(RasterSize::with_rows_cols(1, 5), None);
        let lhs = MaskedRaster::<i32>::from_vec_with_mask(meta.clone(), vec![1, 2, 3, 4, 5], vec![true, false, false, false, false]).unwrap();
        let rhs = MaskedRaster::<i32>::from_vec_with_mask(meta.clone(), vec![1, 2, 0, 4, 5], vec![false, false, false, true, false]).unwrap();
        let unmasked = MaskedRaster::<i32>::from_vec(meta, vec![1, 1, 1, 1, 1]).unwrap();

        assert_eq!(lhs.add_raster(&rhs).unwrap().mask_data(), &[true, false, false, true, false]);
        assert_eq!(lhs.div_raster(&rhs).unwrap().mask_data(), &[true, false, true, true, false]);
        assert_eq!(rhs.mul_raster(&unmasked).unwrap().mask_data(), rhs.mask_data());
        assert!(unmasked.add_raster(&unmasked).unwrap().mask_data().is_empty());
    }

    #[test]
    fn negate_unsigned() {
        let raster = DenseRaster::<u8>::filled_with(meta_with_nodata(SIZE, NOD), 4).unwrap();
        assert!(raster.negate().unwrap_err().is_invalid_argument());

        let raster = DenseRaster::<i8>::filled_with(meta_with_nodata(SIZE, -128.0), 4).unwrap();
        assert!(raster.negate().unwrap().value_iter().all(|v| v == -4));
    }

    #[test]
    #[should_panic]
    fn negate_unsigned_operator() {
        let raster = MaskedRaster::<u32>::filled_with(meta_with_nodata(SIZE, NOD), 4).unwrap();
        let _ = -&raster;
    }

    #[test]
    fn mixed_pixel_types() {
        let meta = meta_with_nodata(RasterSize::with_rows_cols(1, 4), NOD);

        let ints = DenseRaster::<i32>::from_vec(meta.clone(), vec![1, 2, 255, 4]).unwrap();
        let floats = DenseRaster::<f32>::from_vec(meta.clone(), vec![0.5, 255.0, 0.5, 0.5]).unwrap();
        let result: DenseRaster<f32> = &ints + &floats;
        assert_eq!(to_f64(result.iter_opt()), vec![Some(1.5), None, None, Some(4.5)]);

        let bytes = DenseRaster::<u8>::from_vec(meta.clone(), vec![1, 2, 3, 4]).unwrap();
        let signed = MaskedRaster::<i8>::from_vec(meta.clone().with_nodata(Some(-1.0)), vec![-2, -1, 1, 2]).unwrap();
        let result: DenseRaster<i16> = bytes.mul_raster(&signed).unwrap();
        assert_eq!(to_f64(result.iter_opt()), vec![Some(-2.0), None, Some(3.0), Some(8.0)]);
        assert_eq!(result.metadata().nodata, Some(NOD));

        let result: DenseRaster<f64> = bytes.add_scalar(0.25).unwrap();
        assert_eq!(to_f64(result.iter_opt()), vec![Some(1.25), Some(2.25), Some(3.25), Some(4.25)]);

        assert!(bytes.add_scalar(-1000i64).is_ok());
    }

    #[test]
    fn boolean_results_without_nodata() {
        let meta = RasterMetadata::sized_with_nodata(RasterSize::with_rows_cols(1, 3), None);
        let lhs = DenseRaster::<i32>::from_vec(meta.clone(), vec![1, 2, 3]).unwrap();
        let rhs = DenseRaster::<i32>::from_vec(meta, vec![3, 2, 1]).unwrap();

        let result = lhs.less(&rhs).unwrap();
        assert_eq!(result.metadata().nodata, None);
        assert_eq!(result.as_slice(), &[1, 0, 0]);
    }

    #[test]
    fn sparse_mixed_with_dense() {
        let meta = meta_with_nodata(SIZE, NOD);
        let sparse = SparseRaster::<i32>::from_triplets(
            meta.clone(),
            vec![(Cell::from_row_col(0, 0), 4), (Cell::from_row_col(1, 1), 2), (Cell::from_row_col(2, 2), 0)],
        ).unwrap();
        let dense = DenseRaster::<i32>::filled_with(meta, 3).unwrap();

        let result = sparse.add_raster(&dense).unwrap();
        assert_eq!(result.stored_count(), 3);
        assert_eq!(to_f64(result.stored_values().iter().copied().map(Some)), vec![Some(7.0), Some(5.0), Some(3.0)]);

        let result = dense.mul_raster(&sparse).unwrap();
        assert_eq!(result.nodata_count(), 6);
        assert_eq!(result.value_iter().collect::<Vec<_>>(), vec![12, 6, 0]);

        let result = &sparse * 2;
        assert_eq!(result.value_iter().collect::<Vec<_>>(), vec![8, 4, 0]);

        let result = dense.scalar_div(6).unwrap();
        assert!(result.value_iter().all(|v| v == 2));
    }

    #[test_log::test]
    fn clone_is_reported() {
        let raster = DenseRaster::<i32>::filled_with(meta_with_nodata(SIZE, NOD), 1).unwrap();
        #[allow(clippy::redundant_clone)]
        let copy = raster.clone();
        assert_eq!(raster, copy);
        assert_eq!(raster, raster.copy());
    }
}
