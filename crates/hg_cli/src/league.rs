//! League assembly: 32 generated teams with shuffled city/name pairings.

use hg_core::Team;
use rand::seq::SliceRandom;
use rand::Rng;

const CITIES: [&str; 32] = [
    "New York",
    "Toronto",
    "Montreal",
    "Chicago",
    "Boston",
    "Los Angeles",
    "Vancouver",
    "Calgary",
    "Edmonton",
    "Ottawa",
    "Winnipeg",
    "San Jose",
    "Dallas",
    "Detroit",
    "Florida",
    "Nashville",
    "Carolina",
    "Minnesota",
    "Buffalo",
    "Columbus",
    "Arizona",
    "Philadelphia",
    "Pittsburgh",
    "St. Louis",
    "Tampa Bay",
    "Washington",
    "Vegas",
    "Seattle",
    "Anaheim",
    "Colorado",
    "New Jersey",
    "Islanders",
];

const NAMES: [&str; 32] = [
    "Rangers",
    "Maple Leafs",
    "Canadiens",
    "Blackhawks",
    "Bruins",
    "Kings",
    "Canucks",
    "Flames",
    "Oilers",
    "Senators",
    "Jets",
    "Sharks",
    "Stars",
    "Red Wings",
    "Panthers",
    "Predators",
    "Hurricanes",
    "Wild",
    "Sabres",
    "Blue Jackets",
    "Coyotes",
    "Flyers",
    "Penguins",
    "Blues",
    "Lightning",
    "Capitals",
    "Golden Knights",
    "Kraken",
    "Ducks",
    "Avalanche",
    "Devils",
    "Islanders",
];

pub struct League {
    pub teams: Vec<Team>,
}

impl League {
    /// Shuffle city and name lists independently for fresh pairings, then
    /// generate a full roster per team.
    pub fn create(rng: &mut impl Rng) -> Self {
        let mut cities = CITIES.to_vec();
        let mut names = NAMES.to_vec();
        cities.shuffle(rng);
        names.shuffle(rng);
        let teams = cities
            .into_iter()
            .zip(names)
            .map(|(city, name)| Team::generate(city, name, rng))
            .collect();
        Self { teams }
    }

    pub fn reset_statistics(&mut self) {
        for team in &mut self.teams {
            team.reset_statistics();
        }
    }

    /// Two distinct mutable handles for a game. `None` when the indices
    /// collide or fall outside the league.
    pub fn pair_mut(&mut self, home: usize, away: usize) -> Option<(&mut Team, &mut Team)> {
        if home == away || home >= self.teams.len() || away >= self.teams.len() {
            return None;
        }
        if home < away {
            let (left, right) = self.teams.split_at_mut(away);
            Some((&mut left[home], &mut right[0]))
        } else {
            let (left, right) = self.teams.split_at_mut(home);
            Some((&mut right[0], &mut left[away]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_create_builds_32_distinct_teams() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let league = League::create(&mut rng);
        assert_eq!(league.teams.len(), 32);
        let labels: HashSet<String> = league.teams.iter().map(|t| t.to_string()).collect();
        assert_eq!(labels.len(), 32, "city/name pairings repeat");
    }

    #[test]
    fn test_pair_mut_rejects_bad_indices() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut league = League::create(&mut rng);
        assert!(league.pair_mut(3, 3).is_none());
        assert!(league.pair_mut(0, 99).is_none());

        let (home, away) = league.pair_mut(5, 2).expect("valid pair");
        assert_ne!(home.id(), away.id());
    }
}
