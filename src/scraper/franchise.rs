/// Franchise names as the standings page prints them, with their codes.
pub(crate) const FRANCHISES: &[(&str, &str)] = &[
    ("Anaheim Ducks", "ANA"),
    ("Arizona Coyotes", "ARI"),
    ("Boston Bruins", "BOS"),
    ("Buffalo Sabres", "BUF"),
    ("Carolina Hurricanes", "CAR"),
    ("Bay Area Seals/California Golden Seals", "CGS"),
    ("Calgary Flames", "CGY"),
    ("Chicago Blackhawks", "CHI"),
    ("Columbus Blue Jackets", "CBJ"),
    ("Cleveland Barons", "CLE"),
    ("Colorado Avalanche", "COL"),
    ("Dallas Stars", "DAL"),
    ("Detroit Red Wings", "DET"),
    ("Edmonton Oilers", "EDM"),
    ("Florida Panthers", "FLA"),
    ("Hamilton Tigers", "HAM"),
    ("Hartford Whalers", "HFD"),
    ("Kansas City Scouts", "KCS"),
    ("Los Angeles Kings", "LAK"),
    ("Minnesota Wild", "MIN"),
    ("Montreal Canadiens", "MTL"),
    ("Nashville Predators", "NSH"),
    ("New Jersey Devils", "NJD"),
    ("New York Islanders", "NYI"),
    ("New York Rangers", "NYR"),
    ("California Seals/Oakland Seals", "OAK"),
    ("Ottawa Senators", "OTT"),
    ("Philadelphia Flyers", "PHI"),
    ("Phoenix Coyotes", "PHX"),
    ("Pittsburgh Penguins", "PIT"),
    ("San Jose Sharks", "SJS"),
    ("St. Louis Blues", "STL"),
    ("Tampa Bay Lightning", "TBL"),
    ("Toronto Maple Leafs", "TOR"),
    ("Vancouver Canucks", "VAN"),
    ("Vegas Golden Knights", "VGK"),
    ("Winnipeg Jets", "WPG"),
    ("Washington Capitals", "WSH"),
];

/// Look up a franchise code by exact team name. Unknown names map to `""`.
pub fn team_abbreviation(team_name: &str) -> &'static str {
    FRANCHISES
        .iter()
        .find(|(name, _)| *name == team_name)
        .map(|(_, code)| *code)
        .unwrap_or_default()
}
