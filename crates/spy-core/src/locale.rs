//! Locale data: every string the moderator speaks and every marker the
//! parsers look for.
//!
//! Adding a language means adding a [`Locale`] value (or loading one from
//! JSON), never a new code path.

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Strings and markers for one language.
///
/// Templates use `{name}`-style slots filled by [`fill`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    /// Short language code, such as `en`.
    pub code: String,

    /// Display name of the Civilian role.
    pub civilian: String,
    /// Display name of the Spy role.
    pub spy: String,
    /// Display name of the Blank role.
    pub blank: String,

    /// Token standing in for the key in logged text.
    pub key_placeholder: String,
    /// Token agents end every utterance with.
    pub end_of_speech: String,
    /// Marker preceding a vote target.
    pub vote_marker: String,
    /// Marker preceding predicted spies.
    pub spy_marker: String,
    /// Marker preceding predicted blanks.
    pub blank_marker: String,
    /// Separators between names in a predicted list.
    pub list_separators: Vec<String>,

    /// Rules announced when a Blank plays.
    pub rules_with_blank: String,
    /// Rules announced without a Blank.
    pub rules_without_blank: String,
    /// Slots: `{count}`, `{roles}`.
    pub game_start: String,
    /// Slot: `{n}`.
    pub civilian_count: String,
    /// Slot: `{n}`.
    pub spy_count: String,
    /// Slot: `{n}`.
    pub blank_count: String,
    /// Slots: `{name}`, `{key}`.
    pub key_assigned: String,
    /// Slot: `{name}`.
    pub key_blank: String,
    /// Prompt asking players to describe their key.
    pub ask_description: String,
    /// Private warning sent when a description names the key.
    pub description_warning: String,
    /// Slot: `{names}`.
    pub ask_prediction_with_blank: String,
    /// Slot: `{names}`.
    pub ask_prediction_without_blank: String,
    /// Slot: `{names}`.
    pub ask_vote_with_blank: String,
    /// Slot: `{names}`.
    pub ask_vote_without_blank: String,
    /// Slots: `{voter}`, `{target}`.
    pub vote_line: String,
    /// Slot: `{names}`.
    pub revote_note: String,
    /// Slot: `{names}`.
    pub tied: String,
    /// Slot: `{names}`.
    pub eliminated: String,
    /// Slots: `{role}`, `{names}`.
    pub game_over: String,
    /// Announcement that no side has won yet.
    pub game_continues: String,
    /// Heading of the moderator-only setup summary.
    pub init_heading: String,
    /// Heading above the role assignment.
    pub roles_heading: String,
    /// Heading above the key pair.
    pub keys_heading: String,
    /// Slot: `{name}`.
    pub prediction_heading: String,
    /// Heading above the true Spy and Blank sets.
    pub correct_answer: String,
    /// Stand-in description when an agent fails.
    pub nothing_to_say: String,
}

/// Replace `{slot}` occurrences in a template.
///
/// Substitution is a single pass over the template: inserted values are
/// never scanned again, and unknown `{...}` groups are kept verbatim.
pub fn fill(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let value = tail[1..].find('}').and_then(|close| {
            let name = &tail[1..1 + close];
            slots
                .iter()
                .find(|(slot, _)| *slot == name)
                .map(|(_, value)| (*value, close + 2))
        });
        match value {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Render names as `[a, b, c]`.
pub fn name_list<S: AsRef<str>>(names: &[S]) -> String {
    let joined: Vec<&str> = names.iter().map(|n| n.as_ref()).collect();
    format!("[{}]", joined.join(", "))
}

impl Locale {
    /// Display name of a role.
    pub fn role_name(&self, role: Role) -> &str {
        match role {
            Role::Civilian => &self.civilian,
            Role::Spy => &self.spy,
            Role::Blank => &self.blank,
        }
    }

    /// Rules text for the configured blank setting.
    pub fn rules(&self, has_blank: bool) -> &str {
        if has_blank {
            &self.rules_with_blank
        } else {
            &self.rules_without_blank
        }
    }

    /// Look up a built-in locale by code.
    pub fn by_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "en" | "english" => Some(Self::english()),
            "zh" | "cn" | "chinese" => Some(Self::chinese()),
            _ => None,
        }
    }

    /// The built-in English locale.
    pub fn english() -> Self {
        Self {
            code: "en".into(),
            civilian: "civilian".into(),
            spy: "spy".into(),
            blank: "blank".into(),
            key_placeholder: "<KEY>".into(),
            end_of_speech: "<EOS>".into(),
            vote_marker: "vote:".into(),
            spy_marker: "spy:".into(),
            blank_marker: "blank:".into(),
            list_separators: vec![",".into(), ";".into()],
            rules_with_blank: "\
You are playing Who is the Spy.

## Roles
- Civilians all receive the correct key.
- Spies receive a key that is close to the correct one, but different.
- Blank Slates receive no key at all.
Nobody is told their role; listen carefully and infer it.

## Goals
- Civilian: find and vote out the Spies and the Blank Slate without saying the key. Look for the Blank Slate first.
- Spy: blend in and survive the votes. Spies win if one of them is still in when the game ends.
- Blank Slate: help vote out the Spies while hiding that you have no key. You may describe whatever you think the correct key is.

## Stages
1. Clues: every player gives a one-sentence clue about their key.
2. Accusation: every player votes for someone to eliminate.
3. Tiebreak: tied players describe again and a new vote is held among them.

## Conduct
- Keep clues short and never say the key itself.
- Do not repeat an earlier clue.
- Do not speak as another player or as the moderator.
- You may not vote for yourself.
- End every reply with <EOS>."
                .into(),
            rules_without_blank: "\
You are playing Who is the Spy.

## Roles
- Civilians all receive the correct key.
- Spies receive a key that is close to the correct one, but different.
Nobody is told their role; listen carefully and infer it.

## Goals
- Civilian: find and vote out the Spies without saying the key.
- Spy: blend in and survive the votes. Spies win if one of them is still in when the game ends.

## Stages
1. Clues: every player gives a one-sentence clue about their key.
2. Accusation: every player votes for someone to eliminate.
3. Tiebreak: tied players describe again and a new vote is held among them.

## Conduct
- Keep clues short and never say the key itself.
- Do not repeat an earlier clue.
- Do not speak as another player or as the moderator.
- You may not vote for yourself.
- End every reply with <EOS>."
                .into(),
            game_start: "The game begins! There are {count} players: {roles}.".into(),
            civilian_count: "{n} civilians".into(),
            spy_count: "{n} spies".into(),
            blank_count: "{n} blanks".into(),
            key_assigned: "{name}, your key is: {key}".into(),
            key_blank: "{name}, you got a blank clue.".into(),
            ask_description: "Now describe your key in ONE sentence.".into(),
            description_warning:
                "Your description contains your key, which is not allowed. Please describe it again."
                    .into(),
            ask_prediction_with_blank: "\
Who do you think the spies and the blank slate are? Answer in this format:
spy: [<player_name>, ..., <player_name>]; blank: [<player_name>, ..., <player_name>]<EOS>
Player names are: {names}.
Your reply MUST start with 'spy:'"
                .into(),
            ask_prediction_without_blank: "\
Who do you think the spies are? Answer in this format:
spy: [<player_name>, ..., <player_name>]<EOS>
Player names are: {names}.
Your reply MUST start with 'spy:'"
                .into(),
            ask_vote_with_blank: "\
Time to vote someone out. Civilians vote for a suspected Spy or Blank Slate, \
Spies vote for a likely Civilian or Blank Slate, Blank Slates vote for a suspected Spy. \
One vote each, and never for yourself. Answer in this format:
vote: <player_name><EOS>
Candidates are: {names}.
Your reply MUST start with 'vote:'"
                .into(),
            ask_vote_without_blank: "\
Time to vote someone out. Civilians vote for a suspected Spy, Spies vote for a likely Civilian. \
One vote each, and never for yourself. Answer in this format:
vote: <player_name><EOS>
Candidates are: {names}.
Your reply MUST start with 'vote:'"
                .into(),
            vote_line: "{voter} votes for {target}".into(),
            revote_note: "This is a re-vote: only votes for {names} count.".into(),
            tied: "{names} are tied. Those players, please describe your key again.".into(),
            eliminated: "{names} received the most votes and is eliminated.".into(),
            game_over: "Game over! The {role} side wins, winners are: {names}.".into(),
            game_continues: "No side has won yet, the game continues.".into(),
            init_heading: "## Role and key assignment".into(),
            roles_heading: "### Roles".into(),
            keys_heading: "### Keys".into(),
            prediction_heading: "### {name}'s prediction".into(),
            correct_answer: "### Correct answer".into(),
            nothing_to_say: "I have nothing to say.".into(),
        }
    }

    /// The built-in Chinese locale.
    pub fn chinese() -> Self {
        Self {
            code: "zh".into(),
            civilian: "平民".into(),
            spy: "卧底".into(),
            blank: "白板".into(),
            key_placeholder: "<关键词>".into(),
            end_of_speech: "<EOS>".into(),
            vote_marker: "投票：".into(),
            spy_marker: "卧底：".into(),
            blank_marker: "白板：".into(),
            list_separators: vec![
                ",".into(),
                "，".into(),
                "、".into(),
                ";".into(),
                "；".into(),
            ],
            rules_with_blank: "\
下面是游戏规则：

###基础信息###
游戏中有三个角色：平民、卧底和白板。每个人都会收到一条仅自己可见的关键词。
- 平民收到相同的正确关键词。
- 卧底收到相同的错误关键词，与正确关键词相似。
- 白板会被告知自己是白板。
你不会被告知自己的角色，只能通过观察和分析推断。

###游戏阶段###
1. 描述阶段：每位玩家用一句话描述关键词。
2. 预测阶段：推断谁是卧底和白板。
3. 投票阶段：得票最多的玩家被淘汰。

###限定规则###
- 描述要简短，不能直接包含关键词。
- 不能重复之前的描述。
- 不能投自己或已被淘汰的玩家，每人一票。
- 每句话以<EOS>结束。"
                .into(),
            rules_without_blank: "\
下面是游戏规则：

###基础信息###
游戏中有两个角色：平民和卧底。每个人都会收到一条仅自己可见的关键词。
- 平民收到相同的正确关键词。
- 卧底收到相同的错误关键词，与正确关键词相似。
你不会被告知自己的角色，只能通过观察和分析推断。

###游戏阶段###
1. 描述阶段：每位玩家用一句话描述关键词。
2. 预测阶段：推断谁是卧底。
3. 投票阶段：得票最多的玩家被淘汰。

###限定规则###
- 描述要简短，不能直接包含关键词。
- 不能重复之前的描述。
- 不能投自己或已被淘汰的玩家，每人一票。
- 每句话以<EOS>结束。"
                .into(),
            game_start: "游戏开始！本局共有 {count} 名玩家：{roles}。".into(),
            civilian_count: "{n} 名平民".into(),
            spy_count: "{n} 名卧底".into(),
            blank_count: "{n} 名白板".into(),
            key_assigned: "{name}，你的关键词是：{key}。这可能是正确或者错误的关键词".into(),
            key_blank: "{name}，你的角色是白板。".into(),
            ask_description: "描述阶段：请用一句话描述你收到的关键词，或你认为正确的关键词。"
                .into(),
            description_warning: "你的描述包含了关键词，这是不允许的，请重新描述。".into(),
            ask_prediction_with_blank: "\
预测阶段：请推断谁是卧底、谁是白板，并严格按以下格式回答：
卧底：1，6；白板：5<EOS>
玩家的名字是：{names}。"
                .into(),
            ask_prediction_without_blank: "\
预测阶段：请推断谁是卧底，并严格按以下格式回答：
卧底：1，6<EOS>
玩家的名字是：{names}。"
                .into(),
            ask_vote_with_blank: "\
投票阶段：请结合之前的预测进行投票，并按以下格式回答：
投票：<player_name><EOS>
候选玩家：{names}。
你的回答应该以 '投票：' 作为开头"
                .into(),
            ask_vote_without_blank: "\
投票阶段：请结合之前的预测进行投票，并按以下格式回答：
投票：<player_name><EOS>
候选玩家：{names}。
你的回答应该以 '投票：' 作为开头"
                .into(),
            vote_line: "{voter} 投票给 {target}".into(),
            revote_note: "这是一次针对平票玩家的重新投票，仅统计 {names} 的得票。".into(),
            tied: "玩家 {names} 票数相同，请这些玩家再描述一次关键词。".into(),
            eliminated: "玩家 {names} 获得的票数最多，本轮被淘汰。".into(),
            game_over: "游戏结束！{role} 胜利，赢家是：{names}。".into(),
            game_continues: "没有任何角色获胜，游戏继续。".into(),
            init_heading: "## 角色和关键词分配结果".into(),
            roles_heading: "### 角色".into(),
            keys_heading: "### 关键词".into(),
            prediction_heading: "### {name} 的预测".into(),
            correct_answer: "### 正确答案".into(),
            nothing_to_say: "我无话可说。".into(),
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}
