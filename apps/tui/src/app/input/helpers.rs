/// Page to show for "previous". A page past the end steps back onto the last one.
pub fn previous_page(current: usize, page_count: usize) -> Option<usize> {
    if page_count == 0 {
        return None;
    }

    let target = current.saturating_sub(1).clamp(1, page_count);
    (target != current).then_some(target)
}

pub fn next_page(current: usize, page_count: usize) -> Option<usize> {
    if current >= page_count {
        return None;
    }

    Some(current + 1)
}

/// Page for a digit key, if that page has a button.
pub fn page_for_digit(digit: char, page_count: usize) -> Option<usize> {
    let number = usize::try_from(digit.to_digit(10)?).ok()?;
    (1..=page_count).contains(&number).then_some(number)
}
