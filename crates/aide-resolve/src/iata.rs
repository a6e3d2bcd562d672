// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static city tables used by the place resolver.

/// Canonical lowercase city name to primary airport code.
pub const AIRPORTS: &[(&str, &str)] = &[
    ("mumbai", "BOM"),
    ("delhi", "DEL"),
    ("new york", "JFK"),
    ("los angeles", "LAX"),
    ("london", "LHR"),
    ("paris", "CDG"),
    ("dubai", "DXB"),
    ("singapore", "SIN"),
    ("tokyo", "NRT"),
    ("bangkok", "BKK"),
    ("amsterdam", "AMS"),
    ("frankfurt", "FRA"),
    ("hong kong", "HKG"),
    ("toronto", "YYZ"),
    ("sydney", "SYD"),
    ("chicago", "ORD"),
    ("san francisco", "SFO"),
    ("seattle", "SEA"),
    ("beijing", "PEK"),
    ("shanghai", "PVG"),
    ("seoul", "ICN"),
    ("madrid", "MAD"),
    ("barcelona", "BCN"),
    ("rome", "FCO"),
    ("zurich", "ZRH"),
    ("vienna", "VIE"),
    ("doha", "DOH"),
    ("manila", "MNL"),
    ("istanbul", "IST"),
    ("sao paulo", "GRU"),
    ("buenos aires", "EZE"),
    ("johannesburg", "JNB"),
    ("cape town", "CPT"),
    ("auckland", "AKL"),
    ("melbourne", "MEL"),
    ("vancouver", "YVR"),
    ("montreal", "YUL"),
    ("cairo", "CAI"),
    ("athens", "ATH"),
    ("lisbon", "LIS"),
    ("helsinki", "HEL"),
    ("oslo", "OSL"),
    ("stockholm", "ARN"),
    ("copenhagen", "CPH"),
    ("warsaw", "WAW"),
    ("prague", "PRG"),
    ("budapest", "BUD"),
    ("moscow", "SVO"),
    ("riyadh", "RUH"),
    ("kuwait city", "KWI"),
    ("karachi", "KHI"),
    ("lahore", "LHE"),
    ("colombo", "CMB"),
    ("kathmandu", "KTM"),
    ("yangon", "RGN"),
    ("hanoi", "HAN"),
    ("ho chi minh", "SGN"),
    ("jakarta", "CGK"),
    ("kuala lumpur", "KUL"),
    ("taipei", "TPE"),
    ("manchester", "MAN"),
    ("birmingham", "BHX"),
    ("edinburgh", "EDI"),
    ("glasgow", "GLA"),
    ("brussels", "BRU"),
    ("munich", "MUC"),
    ("hamburg", "HAM"),
    ("stuttgart", "STR"),
    ("berlin", "BER"),
    ("geneva", "GVA"),
    ("nice", "NCE"),
    ("lyon", "LYS"),
    ("marseille", "MRS"),
    ("venice", "VCE"),
    ("milan", "MXP"),
    ("naples", "NAP"),
    ("osaka", "KIX"),
    ("kyoto", "UKY"),
    ("nagoya", "NGO"),
    ("fukuoka", "FUK"),
    ("sapporo", "CTS"),
    ("chennai", "MAA"),
    ("kolkata", "CCU"),
    ("bengaluru", "BLR"),
    ("hyderabad", "HYD"),
    ("ahmedabad", "AMD"),
    ("pune", "PNQ"),
    ("goa", "GOI"),
    ("kochi", "COK"),
    ("trivandrum", "TRV"),
    ("indore", "IDR"),
    ("jaipur", "JAI"),
    ("lucknow", "LKO"),
    ("varanasi", "VNS"),
    ("nagpur", "NAG"),
    ("patna", "PAT"),
    ("bhubaneswar", "BBI"),
    ("raipur", "RPR"),
    ("srinagar", "SXR"),
    ("amritsar", "ATQ"),
    ("ranchi", "IXR"),
    ("guwahati", "GAU"),
    ("dehradun", "DED"),
    ("udaipur", "UDR"),
    ("aurangabad", "IXU"),
    ("mysore", "MYQ"),
    ("surat", "STV"),
    ("rajkot", "RAJ"),
    ("vadodara", "BDQ"),
    ("jodhpur", "JDH"),
    ("madurai", "IXM"),
    ("tiruchirappalli", "TRZ"),
    ("coimbatore", "CJB"),
    ("vizag", "VTZ"),
    ("agartala", "IXA"),
    ("dimapur", "DMU"),
    ("shillong", "SHL"),
    ("imphal", "IMF"),
    ("aizawl", "AJL"),
    ("silchar", "IXS"),
    ("bagdogra", "IXB"),
];

/// Common alternate names and misspellings to canonical city names.
pub const ALIASES: &[(&str, &str)] = &[
    ("bangalore", "bengaluru"),
    ("benagluru", "bengaluru"),
    ("bombay", "mumbai"),
    ("madras", "chennai"),
    ("calcutta", "kolkata"),
    ("mumabi", "mumbai"),
    ("delhii", "delhi"),
    ("chenai", "chennai"),
    ("hydrabad", "hyderabad"),
    ("new delhi", "delhi"),
];

/// Airport code for an exact canonical city name.
pub fn airport_code(city: &str) -> Option<&'static str> {
    AIRPORTS
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, code)| *code)
}

/// Canonical city for an exact alias.
pub fn alias_target(alias: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(name, _)| *name == alias)
        .map(|(_, canonical)| *canonical)
}
