use gate::Decision;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl From<ReviewAction> for Decision {
    fn from(action: ReviewAction) -> Decision {
        match action {
            ReviewAction::Approve => Decision::Approve,
            ReviewAction::Reject => Decision::Reject,
        }
    }
}

pub fn encode(action: ReviewAction, tg_id: i64) -> String {
    match action {
        ReviewAction::Approve => format!("approve:{}", tg_id),
        ReviewAction::Reject => format!("reject:{}", tg_id),
    }
}

pub fn decode(data: &str) -> Option<(ReviewAction, i64)> {
    let (action, tg_id) = data.split_once(':')?;
    let tg_id = tg_id.parse().ok()?;
    match action {
        "approve" => Some((ReviewAction::Approve, tg_id)),
        "reject" => Some((ReviewAction::Reject, tg_id)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        assert_eq!(
            decode(&encode(ReviewAction::Approve, 42)),
            Some((ReviewAction::Approve, 42))
        );
        assert_eq!(
            decode(&encode(ReviewAction::Reject, -7)),
            Some((ReviewAction::Reject, -7))
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("approve"), None);
        assert_eq!(decode("approve:not-a-number"), None);
        assert_eq!(decode("promote:42"), None);
    }
}
