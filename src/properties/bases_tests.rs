use approx::assert_abs_diff_eq;
use ndarray::{array, Array2};

use crate::properties::bases::{BasisTransform, ElectronicBasis};

#[test]
fn test_bases_transform_validation() {
    assert!(BasisTransform::new(
        ElectronicBasis::Ao,
        ElectronicBasis::Mo,
        Array2::zeros((2, 2)),
        Some(Array2::zeros((3, 3))),
    )
    .is_err());
    let transform = BasisTransform::new(
        ElectronicBasis::Ao,
        ElectronicBasis::Mo,
        Array2::eye(2),
        None,
    )
    .unwrap();
    assert_eq!(transform.initial_basis(), ElectronicBasis::Ao);
    assert_eq!(transform.final_basis(), ElectronicBasis::Mo);
    assert!(!transform.has_beta());
}

#[test]
fn test_bases_beta_fallback() {
    let transform = BasisTransform::new(
        ElectronicBasis::Ao,
        ElectronicBasis::Mo,
        array![[1.0, 2.0], [3.0, 4.0]],
        None,
    )
    .unwrap();
    assert_eq!(transform.coeff_beta(), transform.coeff_alpha());
}

#[test]
fn test_bases_identity_transform_is_noop() {
    let transform = BasisTransform::new(
        ElectronicBasis::Ao,
        ElectronicBasis::Mo,
        Array2::eye(2),
        None,
    )
    .unwrap();
    let h = array![[1.0, 0.5], [0.5, 2.0]];
    let transformed = transform.transform_one_body(&h).unwrap();
    assert_abs_diff_eq!(transformed[(0, 0)], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(transformed[(0, 1)], 0.5, epsilon = 1e-12);
}

#[test]
fn test_bases_transform_matches_matrix_contraction() {
    let c = array![[0.5483, 1.2183], [0.5483, -1.2183]];
    let h = array![[-1.12, -0.96], [-0.96, -1.12]];
    let transform =
        BasisTransform::new(ElectronicBasis::Ao, ElectronicBasis::Mo, c.clone(), None).unwrap();
    let transformed = transform.transform_one_body(&h).unwrap();
    let expected = c.t().dot(&h).dot(&c);
    for ((i, j), value) in expected.indexed_iter() {
        assert_abs_diff_eq!(transformed[(i, j)], *value, epsilon = 1e-10);
    }
}

#[test]
fn test_bases_transform_shape_mismatch() {
    let transform = BasisTransform::new(
        ElectronicBasis::Ao,
        ElectronicBasis::Mo,
        Array2::eye(2),
        None,
    )
    .unwrap();
    assert!(transform.transform_one_body(&Array2::zeros((3, 3))).is_err());
}
