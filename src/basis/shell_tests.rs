use std::sync::Arc;

use approx;
use nalgebra::{DMatrix, Matrix3, Point3};
use ndarray::{array, Array2};
use proptest::prelude::*;

use crate::auxiliary::center::Center;
use crate::basis::shell::{Shell, ShellDefinition, ShellError};
use crate::group::{AbelianPointGroup, AbelianPointGroupKind, PointGroup};

fn definition(
    l: u32,
    spherical: bool,
    keep_contaminants: bool,
    exponents: &[f64],
    coefficients: Array2<f64>,
) -> ShellDefinition {
    ShellDefinition::builder()
        .l(l)
        .spherical(spherical)
        .keep_contaminants(keep_contaminants)
        .exponents(exponents)
        .coefficients(coefficients)
        .build()
        .unwrap()
}

fn single_primitive(l: u32, spherical: bool, keep_contaminants: bool) -> ShellDefinition {
    definition(l, spherical, keep_contaminants, &[1.3], array![[1.0]])
}

fn center_at(
    kind: AbelianPointGroupKind,
    position: Point3<f64>,
) -> Arc<Center<AbelianPointGroup>> {
    let group = Arc::new(AbelianPointGroup::new(kind));
    Arc::new(Center::from_group(group, position, 1e-6))
}

/// A group with the order of C3v but only three irreducible representations.
#[derive(Debug)]
struct NonAbelianStandIn;

impl PointGroup for NonAbelianStandIn {
    fn name(&self) -> String {
        "C3v".to_string()
    }

    fn order(&self) -> usize {
        6
    }

    fn n_irreps(&self) -> usize {
        3
    }

    fn character(&self, _irrep: usize, _op: usize) -> f64 {
        1.0
    }

    fn spherical_parity(&self, _lpureqns: (u32, i32), _op: usize) -> f64 {
        1.0
    }

    fn cartesian_parity(&self, _lcartqns: (u32, u32, u32), _op: usize) -> f64 {
        1.0
    }

    fn operation_matrix(&self, _op: usize) -> Matrix3<f64> {
        Matrix3::identity()
    }

    fn irrep_symbol(&self, irrep: usize) -> String {
        ["A1", "A2", "E"][irrep].to_string()
    }

    fn operation_symbol(&self, op: usize) -> String {
        format!("R{op}")
    }
}

// ---------
// Scenarios
// ---------

#[test]
fn test_shell_s_at_origin() {
    let center = center_at(AbelianPointGroupKind::D2h, Point3::origin());
    let shell = Shell::new(center, &single_primitive(0, true, false)).unwrap();
    assert_eq!(shell.n_funcs(), 1);
    assert_eq!(shell.cart2spher(), &array![[1.0]]);
    assert_eq!(shell.irreps_of(0), vec![0]);
    assert_eq!(shell.nfunc_per_irrep(), &[1, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn test_shell_p_in_c1() {
    let center = center_at(AbelianPointGroupKind::C1, Point3::new(0.3, 0.1, -0.2));
    let shell = Shell::new(center, &single_primitive(1, true, false)).unwrap();
    assert_eq!(shell.n_funcs(), 3);
    assert_eq!(shell.nfunc_per_irrep(), &[3]);
    for f in 0..3 {
        assert_eq!(shell.irreps_of(f), vec![0]);
        assert_eq!(shell.func_irrep_of(f), vec![f]);
        assert_eq!(shell.irrep_pos(f, 0), Some(0));
    }
    let eye = Array2::<f64>::eye(3);
    for (val, ref_val) in shell.cart2spher().iter().zip(eye.iter()) {
        approx::assert_abs_diff_eq!(*val, *ref_val, epsilon = 1e-14);
    }
}

#[test]
fn test_shell_d_with_contaminants() {
    let center = center_at(AbelianPointGroupKind::D2h, Point3::origin());
    let shell = Shell::new(center, &single_primitive(2, true, true)).unwrap();
    assert_eq!(shell.n_funcs(), 6);
    assert!(shell.keeps_contaminants());
    assert_eq!(shell.cart2spher().dim(), (6, 6));
    let tmat = DMatrix::from_fn(6, 6, |i, j| shell.cart2spher()[(i, j)]);
    assert!(tmat.determinant().abs() > 1e-6);
    // The s contaminant is totally symmetric.
    assert_eq!(shell.irreps_of(5), vec![0]);
    assert_eq!(shell.nfunc_per_irrep(), &[3, 1, 1, 1, 0, 0, 0, 0]);
}

#[test]
fn test_shell_cartesian_is_identity() {
    let center = center_at(AbelianPointGroupKind::C2v, Point3::new(0.0, 0.0, 0.4));
    let shell = Shell::new(center, &single_primitive(2, false, true)).unwrap();
    assert!(!shell.is_spherical());
    assert!(!shell.keeps_contaminants());
    assert_eq!(shell.n_funcs(), 6);
    assert_eq!(shell.cart2spher(), &Array2::<f64>::eye(6));
    // xx, yy, zz in A1; xy in A2; xz in B1; yz in B2.
    assert_eq!(shell.nfunc_per_irrep(), &[3, 1, 1, 1]);
    assert_eq!(shell.irreps_of(1), vec![1]);
    assert_eq!(shell.irreps_of(2), vec![2]);
    assert_eq!(shell.irreps_of(4), vec![3]);
    assert_eq!(shell.func_irrep_of(3), vec![1]);
    assert_eq!(shell.func_irrep_of(5), vec![2]);
}

// -----------
// Regressions
// -----------

#[test]
fn test_shell_c2v_hydrogen_pair_p() {
    let center = center_at(AbelianPointGroupKind::C2v, Point3::new(0.0, 1.43, -1.1));
    assert_eq!(center.images(), &[0, 1, 1, 0]);
    let shell = Shell::new(Arc::clone(&center), &single_primitive(1, true, false)).unwrap();
    assert_eq!(shell.degeneracy(), 2);

    // A1, A2, B1, B2
    assert_eq!(shell.irreps_of(0), vec![1, 2]);
    assert_eq!(shell.irreps_of(1), vec![0, 3]);
    assert_eq!(shell.irreps_of(2), vec![0, 3]);
    assert_eq!(shell.nfunc_per_irrep(), &[2, 1, 1, 2]);
    assert_eq!(shell.nfunc_per_irrep().iter().sum::<usize>(), 6);

    assert_eq!(shell.func_irrep_of(0), vec![0, 0]);
    assert_eq!(shell.func_irrep_of(1), vec![0, 0]);
    assert_eq!(shell.func_irrep_of(2), vec![1, 1]);

    assert_eq!(shell.irrep_pos(0, 0), None);
    assert_eq!(shell.irrep_pos(0, 1), Some(0));
    assert_eq!(shell.irrep_pos(0, 2), Some(1));
    assert_eq!(shell.irrep_pos(0, 3), None);
    assert_eq!(shell.irrep_pos(2, 3), Some(1));
    assert_eq!(shell.n_irreps_of(2), 2);

    assert_eq!(shell.parity().row(0).to_vec(), vec![1, -1, 1, -1]);
}

#[test]
fn test_shell_c2v_hydrogen_pair_s() {
    let center = center_at(AbelianPointGroupKind::C2v, Point3::new(0.0, -1.43, -1.1));
    let shell = Shell::new(center, &single_primitive(0, true, false)).unwrap();
    assert_eq!(shell.irreps_of(0), vec![0, 3]);
    assert_eq!(shell.nfunc_per_irrep(), &[1, 0, 0, 1]);
}

#[test]
fn test_shell_d2h_origin_d() {
    let center = center_at(AbelianPointGroupKind::D2h, Point3::origin());
    let shell = Shell::new(center, &single_primitive(2, true, false)).unwrap();
    // d+2, d-2, d+1, d-1, d0 in Ag, B1g, B2g, B3g, Ag.
    let irreps = (0..5).map(|f| shell.irreps_of(f)).collect::<Vec<_>>();
    assert_eq!(irreps, vec![vec![0], vec![1], vec![2], vec![3], vec![0]]);
    assert_eq!(shell.func_irrep_of(4), vec![1]);
    assert_eq!(shell.nfunc_per_irrep(), &[2, 1, 1, 1, 0, 0, 0, 0]);
}

#[test]
fn test_shell_d2h_origin_f_ungerade() {
    let center = center_at(AbelianPointGroupKind::D2h, Point3::origin());
    let shell = Shell::new(center, &single_primitive(3, true, false)).unwrap();
    // f functions are odd under inversion.
    assert_eq!(shell.nfunc_per_irrep()[..4], [0, 0, 0, 0]);
    assert_eq!(shell.nfunc_per_irrep().iter().sum::<usize>(), 7);
    // f-2 ~ xyz in Au.
    assert_eq!(shell.irreps_of(3), vec![4]);
}

#[test]
fn test_shell_d2h_general_position() {
    let center = center_at(AbelianPointGroupKind::D2h, Point3::new(0.2, -0.7, 1.1));
    let shell = Shell::new(center, &single_primitive(1, true, false)).unwrap();
    assert_eq!(shell.degeneracy(), 8);
    for f in 0..3 {
        assert_eq!(shell.irreps_of(f), (0..8).collect::<Vec<_>>());
        assert_eq!(shell.func_irrep_of(f), vec![f; 8]);
    }
    assert_eq!(shell.nfunc_per_irrep(), &[3; 8]);
}

// ------
// Errors
// ------

#[test]
fn test_shell_rejects_group_with_degenerate_irreps() {
    let group = Arc::new(NonAbelianStandIn);
    let center = Arc::new(Center::from_group(group, Point3::origin(), 1e-6));
    let err = Shell::new(center, &single_primitive(1, true, false)).unwrap_err();
    match err {
        ShellError::Structure { reason, .. } => {
            assert!(reason.contains("3 irreducible representations but order 6"))
        }
        ShellError::Degenerate { .. } => panic!("Unexpected degenerate error."),
    }
}

#[test]
fn test_shell_rejects_inconsistent_images() {
    let c2v = Arc::new(AbelianPointGroup::new(AbelianPointGroupKind::C2v));
    let pair = vec![Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, -1.0, 0.0)];
    let triple = vec![
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, -1.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
    ];
    let bad_centers = [
        // Wrong number of images
        Center::new(Arc::clone(&c2v), pair.clone(), vec![0, 1]).unwrap(),
        // Image outside the orbit
        Center::new(Arc::clone(&c2v), pair.clone(), vec![0, 1, 2, 0]).unwrap(),
        // Unequal cosets
        Center::new(Arc::clone(&c2v), pair, vec![0, 0, 0, 1]).unwrap(),
        // Orbit size not dividing the order
        Center::new(Arc::clone(&c2v), triple, vec![0, 1, 2, 0]).unwrap(),
    ];
    for center in bad_centers {
        let err = Shell::new(Arc::new(center), &single_primitive(0, true, false)).unwrap_err();
        assert!(matches!(err, ShellError::Structure { .. }), "{err}");
        assert!(err.to_string().starts_with("Structural error in S shell"));
    }
}

#[test]
fn test_shell_rejects_bad_contractions() {
    let center = center_at(AbelianPointGroupKind::C2v, Point3::origin());

    let no_prim = definition(1, true, false, &[], Array2::zeros((0, 1)));
    let no_contr = definition(1, true, false, &[1.0], Array2::zeros((1, 0)));
    let mismatch = definition(1, true, false, &[1.0, 0.3], array![[1.0]]);
    let negative = definition(1, true, false, &[-1.0], array![[1.0]]);
    for def in [no_prim, no_contr, mismatch, negative] {
        let err = Shell::new(Arc::clone(&center), &def).unwrap_err();
        assert!(matches!(err, ShellError::Structure { .. }), "{err}");
    }

    let zero = definition(2, true, false, &[1.0, 0.2], array![[0.5, 0.0], [0.5, 0.0]]);
    let err = Shell::new(Arc::clone(&center), &zero).unwrap_err();
    match err {
        ShellError::Degenerate {
            contraction, norm, ..
        } => {
            assert_eq!(contraction, 1);
            assert_eq!(norm, 0.0);
        }
        ShellError::Structure { .. } => panic!("Unexpected structural error."),
    }
}

// -------------
// Normalisation
// -------------

#[test]
fn test_shell_normalised_coefficients() {
    let center = center_at(AbelianPointGroupKind::Cs, Point3::new(0.0, 0.0, 0.8));
    let def = definition(
        2,
        true,
        false,
        &[5.0, 1.2, 0.3],
        array![[0.2, 0.0], [0.5, 0.1], [0.4, 1.0]],
    );
    let shell = Shell::new(center, &def).unwrap();
    // The definition itself is untouched.
    assert_eq!(def.coefficients[(0, 0)], 0.2);
    assert_eq!(shell.n_prim(), 3);
    assert_eq!(shell.n_contr(), 2);
    assert_ne!(shell.coefficients(), &def.coefficients);
    for ov in shell.self_overlaps() {
        approx::assert_relative_eq!(ov, 1.0, max_relative = 1e-10);
    }
}

#[test]
fn test_shell_display() {
    let center = center_at(AbelianPointGroupKind::C2v, Point3::new(0.0, 1.43, -1.1));
    let shell = Shell::new(center, &single_primitive(1, true, false)).unwrap();
    let report = shell.to_string();
    assert!(report.starts_with("P shell (spherical, 1 primitive(s), 1 contraction(s)) on Centre"));
    assert!(report.contains("A2[0] B1[0]"));
    assert!(report.contains("A1[1] B2[1]"));
}

// ----------
// Properties
// ----------

fn coordinate_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), -2.0f64..2.0]
}

fn kind_strategy() -> impl Strategy<Value = AbelianPointGroupKind> {
    prop_oneof![
        Just(AbelianPointGroupKind::C1),
        Just(AbelianPointGroupKind::Ci),
        Just(AbelianPointGroupKind::Cs),
        Just(AbelianPointGroupKind::C2),
        Just(AbelianPointGroupKind::C2h),
        Just(AbelianPointGroupKind::C2v),
        Just(AbelianPointGroupKind::D2),
        Just(AbelianPointGroupKind::D2h),
    ]
}

proptest! {
    #[test]
    fn test_shell_classification_invariants(
        kind in kind_strategy(),
        x in coordinate_strategy(),
        y in coordinate_strategy(),
        z in coordinate_strategy(),
        l in 0u32..5,
        spherical in any::<bool>(),
        keep_contaminants in any::<bool>(),
    ) {
        let center = center_at(kind, Point3::new(x, y, z));
        let shell = Shell::new(
            Arc::clone(&center),
            &single_primitive(l, spherical, keep_contaminants),
        )
        .unwrap();
        let ncart = ((l + 1) * (l + 2) / 2) as usize;
        let nfunc = if spherical && !keep_contaminants {
            (2 * l + 1) as usize
        } else {
            ncart
        };
        prop_assert_eq!(shell.n_funcs(), nfunc);
        prop_assert!(shell.parity().iter().all(|&p| p == 1 || p == -1));
        prop_assert_eq!(
            shell.nfunc_per_irrep().iter().sum::<usize>(),
            nfunc * center.ndegen()
        );
        for f in 0..nfunc {
            prop_assert_eq!(shell.n_irreps_of(f), center.ndegen());
        }
        prop_assert_eq!(shell.cart2spher().dim(), (ncart, nfunc));
        if !spherical {
            prop_assert_eq!(shell.cart2spher(), &Array2::<f64>::eye(ncart));
        }
    }
}
