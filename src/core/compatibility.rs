use crate::models::BloodType;
use crate::models::BloodType::*;

/// Blood types a recipient of `recipient` can safely receive from
///
/// Standard ABO/Rh red cell compatibility: O- is the universal donor and AB+
/// the universal recipient. Every type is compatible with itself.
pub fn compatible_donors_for(recipient: BloodType) -> &'static [BloodType] {
    match recipient {
        APositive => &[APositive, ANegative, OPositive, ONegative],
        ANegative => &[ANegative, ONegative],
        BPositive => &[BPositive, BNegative, OPositive, ONegative],
        BNegative => &[BNegative, ONegative],
        AbPositive => &[
            APositive, ANegative, BPositive, BNegative,
            AbPositive, AbNegative, OPositive, ONegative,
        ],
        AbNegative => &[ANegative, BNegative, AbNegative, ONegative],
        OPositive => &[OPositive, ONegative],
        ONegative => &[ONegative],
    }
}

/// Blood types that can receive blood from a donor of type `donor`
///
/// Exact inverse of [`compatible_donors_for`].
pub fn can_donate_to(donor: BloodType) -> &'static [BloodType] {
    match donor {
        APositive => &[APositive, AbPositive],
        ANegative => &[APositive, ANegative, AbPositive, AbNegative],
        BPositive => &[BPositive, AbPositive],
        BNegative => &[BPositive, BNegative, AbPositive, AbNegative],
        AbPositive => &[AbPositive],
        AbNegative => &[AbPositive, AbNegative],
        OPositive => &[APositive, BPositive, AbPositive, OPositive],
        ONegative => &[
            APositive, ANegative, BPositive, BNegative,
            AbPositive, AbNegative, OPositive, ONegative,
        ],
    }
}

#[inline]
pub fn is_compatible(donor: BloodType, recipient: BloodType) -> bool {
    compatible_donors_for(recipient).contains(&donor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_compatibility() {
        for t in BloodType::ALL {
            assert!(is_compatible(t, t), "{} should accept itself", t);
        }
    }

    #[test]
    fn test_universal_donor_and_recipient() {
        for t in BloodType::ALL {
            assert!(compatible_donors_for(t).contains(&ONegative));
        }
        assert_eq!(compatible_donors_for(AbPositive).len(), 8);
        assert_eq!(can_donate_to(ONegative).len(), 8);
        assert_eq!(can_donate_to(AbPositive), &[AbPositive]);
    }

    #[test]
    fn test_tables_are_inverse() {
        for donor in BloodType::ALL {
            for recipient in BloodType::ALL {
                assert_eq!(
                    can_donate_to(donor).contains(&recipient),
                    compatible_donors_for(recipient).contains(&donor),
                    "mismatch for donor {} -> recipient {}",
                    donor,
                    recipient
                );
            }
        }
    }

    #[test]
    fn test_rh_negative_recipient() {
        assert!(!is_compatible(OPositive, ONegative));
        assert!(!is_compatible(APositive, AbNegative));
        assert!(is_compatible(BNegative, AbNegative));
    }
}
