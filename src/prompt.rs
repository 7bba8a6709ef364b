// src/prompt.rs

//! Prompt templating and agent command construction.

use crate::config::AgentSettings;

/// Build the execution prompt for a ticket.
///
/// The description and plan are embedded verbatim; the prompt travels to
/// the agent as a single process argument, never through a shell.
pub fn execution_prompt(description: &str, plan: &str) -> String {
    format!(
        "You are a senior software developer.\n\
         \n\
         You will receive:\n\
         - A description of a task (taken from a ticket)\n\
         - An execution plan\n\
         \n\
         Your job is to write the code needed to complete that task,\n\
         following the instructions given. If the plan is not enough, fill\n\
         the gaps with common sense and good practices. Keep the code clean\n\
         and modular, commented where necessary. Do not explain, do not\n\
         summarize, do not add filler text: return only the code, ready to\n\
         use.\n\
         \n\
         ---\n\
         TASK DESCRIPTION:\n\
         {description}\n\
         \n\
         EXECUTION PLAN:\n\
         {plan}\n\
         \n\
         Result:\n"
    )
}

/// Build the direct argument vector for one agent invocation.
///
/// Shape: `[program, -m, <model>, <extra args…>, -p, <prompt>]`. The
/// prompt is one argv element, so no quoting or escaping is needed.
pub fn agent_argv(agent: &AgentSettings, prompt: &str) -> Vec<String> {
    let mut argv = Vec::with_capacity(agent.args.len() + 5);
    argv.push(agent.program.clone());
    argv.push("-m".to_string());
    argv.push(agent.model.clone());
    argv.extend(agent.args.iter().cloned());
    argv.push("-p".to_string());
    argv.push(prompt.to_string());
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_description_and_plan() {
        let prompt = execution_prompt("fix the login page", "1. find bug\n2. fix it");

        assert!(prompt.contains("TASK DESCRIPTION:\nfix the login page"));
        assert!(prompt.contains("EXECUTION PLAN:\n1. find bug\n2. fix it"));
    }

    #[test]
    fn argv_keeps_prompt_as_single_element() {
        let agent = AgentSettings::default();
        let prompt = "do \"quoted\" things; echo $HOME";
        let argv = agent_argv(&agent, prompt);

        assert_eq!(argv[0], "gemini");
        assert_eq!(&argv[1..3], ["-m", "gemini-2.5-flash"]);
        assert_eq!(argv[3], "-y");
        assert_eq!(&argv[4..], ["-p", prompt]);
    }
}
