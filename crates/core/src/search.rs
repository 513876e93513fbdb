use crate::grouping::ContinentGroup;

/// Narrows the selector tree to a case-insensitive substring query.
///
/// A blank query keeps every group. A continent whose label matches keeps
/// all of its countries; otherwise only matching countries survive, and
/// continents left empty are dropped.
pub fn filter_groups(groups: &[ContinentGroup], query: &str) -> Vec<ContinentGroup> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return groups.to_vec();
    }

    groups
        .iter()
        .filter_map(|group| {
            if group.continent.label().to_lowercase().contains(&query) {
                return Some(group.clone());
            }

            let countries: Vec<_> = group
                .countries
                .iter()
                .filter(|country| country.name.to_lowercase().contains(&query))
                .cloned()
                .collect();

            if countries.is_empty() {
                None
            } else {
                Some(ContinentGroup {
                    continent: group.continent,
                    countries,
                    total_films: group.total_films,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::continent::Continent;
    use crate::grouping::group;
    use crate::transform::DerivedCountryEntry;

    fn groups() -> Vec<ContinentGroup> {
        let entries = [
            ("United States", Continent::NorthAmerica, 847),
            ("Canada", Continent::NorthAmerica, 87),
            ("France", Continent::Europe, 623),
            ("Germany", Continent::Europe, 210),
            ("Japan", Continent::Asia, 349),
        ]
        .into_iter()
        .map(|(name, continent, film_count)| DerivedCountryEntry {
            name: name.to_string(),
            continent,
            film_count,
            percent_of_total: 0.0,
        })
        .collect::<Vec<_>>();
        group(&entries)
    }

    #[test]
    fn blank_query_keeps_everything() {
        assert_eq!(filter_groups(&groups(), "   "), groups());
    }

    #[test]
    fn continent_match_keeps_whole_group() {
        let filtered = filter_groups(&groups(), "EURO");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].continent, Continent::Europe);
        assert_eq!(filtered[0].countries.len(), 2);
    }

    #[test]
    fn country_match_keeps_only_matching_members() {
        let filtered = filter_groups(&groups(), "an");
        let names: Vec<(Continent, Vec<&str>)> = filtered
            .iter()
            .map(|g| (g.continent, g.names().collect()))
            .collect();
        assert_eq!(
            names,
            vec![
                (Continent::NorthAmerica, vec!["Canada"]),
                (Continent::Europe, vec!["France", "Germany"]),
                (Continent::Asia, vec!["Japan"]),
            ]
        );
    }

    #[test]
    fn groups_without_matches_are_dropped() {
        assert!(filter_groups(&groups(), "zzz").is_empty());
        let filtered = filter_groups(&groups(), "japan");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].continent, Continent::Asia);
    }
}
