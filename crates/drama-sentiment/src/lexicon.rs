//! Word valences, intensifiers and negators.

/// Word valences on a `[-4.0, 4.0]` scale.
///
/// Keys are lowercase single words. The table leans towards the vocabulary of
/// heated online arguments: insults and hostility are well covered, mild
/// approval less so.
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Hostility and insults
    ("hate", -2.7),
    ("hated", -3.2),
    ("hates", -1.9),
    ("hating", -2.3),
    ("hateful", -2.2),
    ("idiot", -2.3),
    ("idiots", -2.5),
    ("idiotic", -2.6),
    ("stupid", -2.4),
    ("stupidity", -2.4),
    ("dumb", -2.3),
    ("moron", -2.2),
    ("morons", -2.3),
    ("moronic", -2.7),
    ("retarded", -2.4),
    ("pathetic", -2.4),
    ("loser", -2.4),
    ("losers", -2.4),
    ("scum", -3.4),
    ("trash", -1.5),
    ("garbage", -1.9),
    ("disgusting", -2.4),
    ("disgusted", -2.4),
    ("gross", -2.1),
    ("vile", -3.1),
    ("evil", -3.4),
    ("awful", -2.0),
    ("terrible", -2.1),
    ("horrible", -2.5),
    ("horrific", -3.4),
    ("worst", -3.1),
    ("worse", -2.1),
    ("bad", -2.5),
    ("shit", -2.6),
    ("shitty", -2.6),
    ("bullshit", -2.8),
    ("crap", -1.6),
    ("fuck", -2.5),
    ("fucked", -3.4),
    ("damn", -1.7),
    ("damned", -1.6),
    ("hell", -3.6),
    ("ass", -2.5),
    ("asshole", -2.5),
    ("bitch", -2.8),
    ("bastard", -2.5),
    ("cunt", -2.2),
    ("dick", -2.3),
    ("kill", -3.7),
    ("killed", -3.5),
    ("die", -2.9),
    ("dead", -3.3),
    ("murder", -3.7),
    ("violent", -2.9),
    ("attack", -2.1),
    ("destroy", -2.6),
    ("ruined", -2.4),
    ("ugly", -3.1),
    ("liar", -2.7),
    ("lies", -1.8),
    ("lying", -2.4),
    ("fraud", -2.8),
    ("scam", -2.7),
    ("clown", -0.7),
    ("cringe", -1.9),
    ("toxic", -2.6),
    ("racist", -3.1),
    ("nazi", -3.0),
    ("fascist", -2.9),
    ("ignorant", -1.8),
    ("delusional", -2.0),
    ("insane", -1.7),
    ("crazy", -1.4),
    ("ridiculous", -1.5),
    ("absurd", -1.3),
    ("nonsense", -1.7),
    ("shame", -2.1),
    ("shameful", -2.2),
    ("embarrassing", -1.6),
    ("annoying", -1.7),
    ("annoyed", -1.6),
    // Anger and distress
    ("angry", -2.3),
    ("anger", -2.7),
    ("furious", -2.7),
    ("mad", -2.2),
    ("rage", -2.6),
    ("outraged", -2.3),
    ("pissed", -3.2),
    ("hostile", -2.2),
    ("threat", -2.4),
    ("fear", -2.2),
    ("afraid", -2.0),
    ("scared", -1.9),
    ("sad", -2.1),
    ("depressed", -2.3),
    ("miserable", -2.2),
    ("hurt", -2.4),
    ("pain", -2.3),
    ("cry", -2.1),
    ("crying", -2.1),
    ("suffer", -2.5),
    ("problem", -1.7),
    ("wrong", -2.1),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("useless", -1.8),
    ("worthless", -2.9),
    ("boring", -1.3),
    ("sucks", -1.5),
    ("blame", -1.4),
    ("ban", -2.6),
    ("banned", -2.0),
    ("war", -2.9),
    ("no", -1.2),
    // Approval and warmth
    ("good", 1.9),
    ("great", 3.1),
    ("excellent", 2.7),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("wonderful", 2.7),
    ("fantastic", 2.6),
    ("perfect", 2.7),
    ("best", 3.2),
    ("better", 1.9),
    ("nice", 1.8),
    ("cool", 1.3),
    ("fine", 0.8),
    ("ok", 1.2),
    ("okay", 0.9),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("like", 1.5),
    ("liked", 1.8),
    ("enjoy", 2.2),
    ("happy", 2.7),
    ("glad", 2.0),
    ("fun", 2.3),
    ("funny", 1.9),
    ("lol", 1.8),
    ("lmao", 2.0),
    ("haha", 2.0),
    ("thanks", 1.9),
    ("thank", 1.5),
    ("please", 1.3),
    ("agree", 1.5),
    ("agreed", 1.1),
    ("right", 0.9),
    ("true", 1.9),
    ("correct", 1.6),
    ("fair", 1.3),
    ("respect", 2.1),
    ("kind", 2.4),
    ("support", 1.7),
    ("helpful", 1.8),
    ("help", 1.7),
    ("hope", 1.9),
    ("smart", 1.7),
    ("brilliant", 2.8),
    ("beautiful", 2.9),
    ("win", 2.8),
    ("won", 2.7),
    ("winning", 2.3),
    ("safe", 1.9),
    ("calm", 1.3),
    ("peace", 2.5),
    ("friend", 2.2),
    ("friends", 2.1),
    ("yes", 1.7),
    ("based", 1.4),
];

/// Words that raise (positive) or lower (negative) the intensity of the
/// next sentiment-bearing word.
pub(crate) const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", 0.293),
    ("completely", 0.293),
    ("extremely", 0.293),
    ("fucking", 0.293),
    ("incredibly", 0.293),
    ("really", 0.293),
    ("so", 0.293),
    ("totally", 0.293),
    ("very", 0.293),
    ("utterly", 0.293),
    ("most", 0.293),
    ("barely", -0.293),
    ("hardly", -0.293),
    ("kinda", -0.293),
    ("slightly", -0.293),
    ("somewhat", -0.293),
    ("sorta", -0.293),
    ("little", -0.293),
];

/// Words that flip the polarity of the next few words.
pub(crate) const NEGATORS: &[&str] = &[
    "aint", "cannot", "cant", "darent", "didnt", "doesnt", "dont", "hadnt", "hasnt", "havent",
    "isnt", "neither", "never", "none", "nope", "nor", "not", "nothing", "nowhere", "shouldnt",
    "wasnt", "werent", "without", "wont", "wouldnt",
];

pub(crate) fn valence(word: &str) -> Option<f64> {
    LEXICON
        .iter()
        .find(|(lex_word, _)| *lex_word == word)
        .map(|&(_, weight)| weight)
}

pub(crate) fn booster(word: &str) -> Option<f64> {
    BOOSTERS
        .iter()
        .find(|(b, _)| *b == word)
        .map(|&(_, weight)| weight)
}

/// Negation check on an apostrophe-stripped lowercase word.
pub(crate) fn is_negator(word: &str) -> bool {
    NEGATORS.contains(&word)
}
