//! Player-facing text in every supported language.
//!
//! Templates use `{}` placeholders filled left to right by [`fill`].

use std::fmt::Display;

/// One language's message table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub next: &'static str,
    pub question: &'static str,
    /// Question prompt line, IRC bold green.
    pub question_line: &'static str,
    /// Audio stream link, IRC blue.
    pub url_line: &'static str,
    pub clue: &'static str,
    pub give_clue: &'static str,
    pub answer_length: &'static str,
    pub no_one_got: &'static str,
    pub welcome: &'static str,
    pub have_an_admin: &'static str,
    pub have_help: &'static str,
    pub help: &'static str,
    pub respond_on_channel: &'static str,
    pub user_got_it: &'static str,
    pub the_answer_was: &'static str,
    pub point_added: &'static str,
    pub points_added: &'static str,
    pub max_point_announce: &'static str,
    pub number_one: &'static str,
    pub ranking: &'static str,
    pub ranking_last: &'static str,
    pub on_rank_mode_reward: &'static str,
    pub on_streak_mode_reward: &'static str,
    pub on_frost_win: &'static str,
    pub timing: &'static str,
    pub belong: &'static str,
    pub commands: &'static str,
    pub admin_cmds: &'static str,
    pub source: &'static str,
    pub not_allowed: &'static str,
    pub looks_oddly: &'static str,
    pub not_playing: &'static str,
    pub already_voted: &'static str,
    pub you_voted: &'static str,
    pub thanks: &'static str,
    pub rankings: &'static str,
    pub see_you: &'static str,
    pub score: &'static str,
    pub idku: &'static str,
    pub skipped_the_answer_was: &'static str,
    pub standings: &'static str,
    pub rank_on: &'static str,
    pub rank_off: &'static str,
    pub audio_on: &'static str,
    pub audio_off: &'static str,
    pub freeze: &'static str,
    pub unfreeze: &'static str,
    pub freeze_no_score: &'static str,
    pub already_frozen: &'static str,
    pub not_frozen: &'static str,
    pub frostlist: &'static str,
    pub score_set: &'static str,
    pub not_in_scores: &'static str,
    pub set_usage: &'static str,
    pub nick_usage: &'static str,
    pub saved: &'static str,
    pub bank_unavailable: &'static str,
    pub signing_off: &'static str,
    pub restarting: &'static str,
    pub updating: &'static str,
}

impl Text {
    /// Table for `lang`; unknown languages get English.
    pub fn for_lang(lang: &str) -> Self {
        match lang {
            "ro" => Self::romanian(),
            _ => Self::english(),
        }
    }

    pub fn english() -> Self {
        Self {
            next: "Next question:",
            question: "Question:",
            question_line: "\x02\x0303{}\x0f",
            url_line: "\x0312{}\x0f",
            clue: "Clue: {}",
            give_clue: "Clue: {}",
            answer_length: "{} characters",
            no_one_got: "No one got it. The answer was: {}",
            welcome: "Welcome to {}!",
            have_an_admin: "Have an admin start the game when you are ready.",
            have_help: "For how to use this bot, just say !help or",
            help: "{} help.",
            respond_on_channel: "I'm sorry, answers must be given in the game channel.",
            user_got_it: "{} GOT IT!",
            the_answer_was: "If there was any doubt, the correct answer was: {}",
            point_added: "{} point has been added to your score!",
            points_added: "{} points have been added to your score!",
            max_point_announce: "Points for this answer were capped at {}.",
            number_one: "{} is number one with {} points!",
            ranking: "{} now has {} points and is ranked #{}, ahead of {}.",
            ranking_last: "{} now has {} points and is ranked #{}.",
            on_rank_mode_reward: "{} climbed the standings and earns +{}!",
            on_streak_mode_reward: "{} is on a streak and earns +{}!",
            on_frost_win: "{}'s score is frozen, no points this time.",
            timing: "{} answered in {}.{:02} seconds.",
            belong: "I'm {}'s trivia bot.",
            commands: "Commands: score, standings, hint, help, next, source",
            admin_cmds: "Admin commands: die, restart, update, set <user> <score>, start, stop, save, rankon, rankoff, skip, audio, text, freeze <user>, unfreeze <user>, frostlist",
            source: "My source can be found at: {}",
            not_allowed: "{}: You don't tell me what to do.",
            looks_oddly: "{}looks at {} oddly.",
            not_playing: "We aren't playing right now.",
            already_voted: "You already voted, {}, give someone else a chance to hate this question",
            you_voted: "{}, you have voted. {} more votes needed to skip.",
            thanks: "Thanks for playing trivia!",
            rankings: "Current rankings were:",
            see_you: "Scores have been saved, and see you next game!",
            score: "Your current score is: {}",
            idku: "You aren't in my database.",
            skipped_the_answer_was: "Question has been skipped. The answer was: {}",
            standings: "The current trivia standings are: ",
            rank_on: "Standings display is on.",
            rank_off: "Standings display is off.",
            audio_on: "Audio mode is on, listen to the narrator!",
            audio_off: "Audio mode is off, back to text questions.",
            freeze: "{}'s score is now frozen.",
            unfreeze: "{}'s score is no longer frozen.",
            freeze_no_score: "WARNING: {} doesn't have any score. They will be frozen anyway.",
            already_frozen: "WARNING: {} is already frozen.",
            not_frozen: "WARNING: {} is not frozen.",
            frostlist: "The following users have frozen scores: {}",
            score_set: "{} score set to {}",
            not_in_scores: "{} not in scores database.",
            set_usage: "Usage: set <user> <score>",
            nick_usage: "Usage: {} <user>",
            saved: "Scores have been saved.",
            bank_unavailable: "The question bank is unavailable, stopping the game.",
            signing_off: "This is triviabot, signing off.",
            restarting: "Triviabot restarting.",
            updating: "I will update now! Wait a few minutes",
        }
    }

    pub fn romanian() -> Self {
        Self {
            next: "Următoarea întrebare:",
            question: "Întrebare:",
            clue: "Pistă: {}",
            give_clue: "Pistă: {}",
            no_one_got: "Aşadar, nimeni nu a ştiut-o. Răspunsul era: {}",
            welcome: "Bun-venit la {}!",
            have_an_admin: "Ca un admin să pornească jocul când toată lumea e gata.",
            have_help: "Ca să vedeţi instrucţiunile, tastaţi !help sau",
            user_got_it: "{} A ŞTIUT-O!",
            the_answer_was: "Dacă cumva aveaţi dubii, răspunsul corect era: {}",
            point_added: "{} punct a fost adăugat la scorul tău!",
            points_added: "{} puncte au fost adăugate la scorul tău!",
            belong: "Sunt bot-ul trivia al lui {}.",
            commands: "Comenzi pentru jucători: score, standings, hint, help, next, source",
            admin_cmds: "Comenzi pentru admini: die, restart, update, set <user> <score>, start, stop, save, rankon, rankoff, skip, audio, text, freeze <user>, unfreeze <user>, frostlist",
            looks_oddly: "{}trivia nu poate procesa ceea ce {} vrea.",
            already_voted: "Bre {}, matale deja ai votat, ar trebui să voteze altcineva.",
            you_voted: "{}, ai votat pentru a sări peste întrebarea curentă. Totuşi e nevoie să mai voteze încă {}",
            skipped_the_answer_was: "Păi am sărit peste această întrebare. Răspunsul era: {}",
            ..Self::english()
        }
    }
}

/// Substitute `args` into the `{}` placeholders of `template` in order.
///
/// `{:02}` zero-pads a numeric argument to two digits. Surplus placeholders
/// are left as-is.
pub fn fill(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut args = args.iter();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let (spec_len, padded) = if tail.starts_with("{}") {
            (2, false)
        } else if tail.starts_with("{:02}") {
            (5, true)
        } else {
            out.push('{');
            rest = &tail[1..];
            continue;
        };
        match args.next() {
            Some(arg) if padded => out.push_str(&format!("{:0>2}", arg.to_string())),
            Some(arg) => out.push_str(&arg.to_string()),
            None => out.push_str(&tail[..spec_len]),
        }
        rest = &tail[spec_len..];
    }
    out.push_str(rest);
    out
}

/// Prefix channel text with the configured colour code.
pub fn colorize(color_code: &str, text: &str) -> String {
    if color_code.is_empty() {
        text.to_string()
    } else {
        format!("{color_code}{text}")
    }
}
