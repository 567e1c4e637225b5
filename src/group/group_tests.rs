use approx::assert_relative_eq;
use nalgebra::Point3;

use crate::angmom::sh_conversion::cartcoef;
use crate::basis::ao::{CartOrder, PureOrder};
use crate::group::{AbelianPointGroup, AbelianPointGroupKind, PointGroup};

const ALL_KINDS: [AbelianPointGroupKind; 8] = [
    AbelianPointGroupKind::C1,
    AbelianPointGroupKind::Ci,
    AbelianPointGroupKind::Cs,
    AbelianPointGroupKind::C2,
    AbelianPointGroupKind::C2h,
    AbelianPointGroupKind::C2v,
    AbelianPointGroupKind::D2,
    AbelianPointGroupKind::D2h,
];

#[test]
fn test_group_abelian_orders() {
    let expected_orders = [1, 2, 2, 2, 4, 4, 4, 8];
    for (kind, order) in ALL_KINDS.iter().zip(expected_orders.iter()) {
        let group = AbelianPointGroup::new(*kind);
        assert_eq!(group.order(), *order);
        assert_eq!(group.n_irreps(), *order);
        assert_eq!(group.operation_symbol(0), "E");
        assert_eq!(group.name(), kind.to_string());
    }
}

#[test]
fn test_group_abelian_character_orthogonality() {
    for kind in ALL_KINDS {
        let group = AbelianPointGroup::new(kind);
        let order = group.order();
        for irrep_i in 0..group.n_irreps() {
            assert_eq!(group.character(irrep_i, 0), 1.0);
            for irrep_j in 0..group.n_irreps() {
                let ov: f64 = (0..order)
                    .map(|op| group.character(irrep_i, op) * group.character(irrep_j, op))
                    .sum();
                if irrep_i == irrep_j {
                    assert_relative_eq!(ov, order as f64);
                } else {
                    assert_relative_eq!(ov, 0.0);
                }
            }
        }
        for op in 0..order {
            assert_eq!(group.character(0, op), 1.0);
        }
    }
}

#[test]
fn test_group_abelian_c2v_character_table() {
    let group = AbelianPointGroup::new(AbelianPointGroupKind::C2v);
    let symbols = (0..4).map(|i| group.irrep_symbol(i)).collect::<Vec<_>>();
    assert_eq!(symbols, vec!["A1", "A2", "B1", "B2"]);
    let chars = (0..4)
        .map(|irrep| {
            (0..4)
                .map(|op| group.character(irrep, op) as i32)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    assert_eq!(
        chars,
        vec![
            vec![1, 1, 1, 1],
            vec![1, 1, -1, -1],
            vec![1, -1, 1, -1],
            vec![1, -1, -1, 1],
        ]
    );
}

#[test]
fn test_group_abelian_d2h_character_table() {
    let group = AbelianPointGroup::new(AbelianPointGroupKind::D2h);
    // Au is odd under every improper operation and even under every rotation.
    let au = (0..8)
        .map(|op| group.character(4, op) as i32)
        .collect::<Vec<_>>();
    assert_eq!(au, vec![1, 1, 1, 1, -1, -1, -1, -1]);
    let b3u = (0..8)
        .map(|op| group.character(7, op) as i32)
        .collect::<Vec<_>>();
    assert_eq!(b3u, vec![1, -1, -1, 1, -1, 1, 1, -1]);
}

#[test]
fn test_group_abelian_parities() {
    let group = AbelianPointGroup::new(AbelianPointGroupKind::D2h);
    // C2(z)
    assert_eq!(group.cartesian_parity((1, 0, 0), 1), -1.0);
    assert_eq!(group.cartesian_parity((1, 1, 0), 1), 1.0);
    assert_eq!(group.cartesian_parity((0, 0, 3), 1), 1.0);
    // i
    assert_eq!(group.cartesian_parity((2, 1, 0), 4), -1.0);
    assert_eq!(group.spherical_parity((3, -2), 4), -1.0);
    assert_eq!(group.spherical_parity((2, 0), 4), 1.0);
    // σ(xz) flips y only: sine-type components are odd.
    assert_eq!(group.spherical_parity((2, -1), 6), -1.0);
    assert_eq!(group.spherical_parity((2, 1), 6), 1.0);
}

#[test]
fn test_group_abelian_spherical_parity_matches_cartesian_components() {
    for kind in ALL_KINDS {
        let group = AbelianPointGroup::new(kind);
        for l in 0..=5 {
            let cartorder = CartOrder::lex(l);
            let pureorder = PureOrder::new(l, true);
            for &lpureqns in pureorder.iter() {
                for &lcartqns in cartorder.iter() {
                    if cartcoef(lpureqns, lcartqns).abs() < 1e-12 {
                        continue;
                    }
                    for op in 0..group.order() {
                        assert_eq!(
                            group.spherical_parity(lpureqns, op),
                            group.cartesian_parity(lcartqns, op),
                            "{kind}: {lpureqns:?} vs {lcartqns:?} under op {op}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_group_abelian_transform_point() {
    let group = AbelianPointGroup::new(AbelianPointGroupKind::C2v);
    let pt = Point3::new(0.3, -1.2, 0.7);
    assert_eq!(group.transform_point(0, &pt), pt);
    assert_eq!(group.transform_point(1, &pt), Point3::new(-0.3, 1.2, 0.7));
    assert_eq!(group.transform_point(2, &pt), Point3::new(0.3, 1.2, 0.7));
    assert_eq!(group.transform_point(3, &pt), Point3::new(-0.3, -1.2, 0.7));
}

#[test]
fn test_group_abelian_kind_from_str() {
    assert_eq!(
        "C2v".parse::<AbelianPointGroupKind>().unwrap(),
        AbelianPointGroupKind::C2v
    );
    assert_eq!(
        "d2h".parse::<AbelianPointGroupKind>().unwrap(),
        AbelianPointGroupKind::D2h
    );
    assert!("C3v".parse::<AbelianPointGroupKind>().is_err());
}

#[test]
fn test_group_abelian_display() {
    let group = AbelianPointGroup::new(AbelianPointGroupKind::C2h);
    let table = group.to_string();
    assert!(table.starts_with("Point group: C2h"));
    assert!(table.contains("Bg"));
    assert_eq!(table.lines().count(), 6);
}
