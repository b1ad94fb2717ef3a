//! The built-in question catalog.
//!
//! Skill names are chosen so that none is a case-insensitive substring of
//! another; substring-scoped store statistics then line up with these lists.

pub(crate) type SkillEntry = (&'static str, [(&'static str, &'static [&'static str]); 3]);

pub(crate) const INITIAL: [SkillEntry; 11] = [
    (
        "Python",
        [
            (
                "basic",
                &[
                    "What are the basic data types in Python?",
                    "What is a list in Python and how does it differ from a tuple?",
                    "How are text strings handled in Python?",
                    "What are lambda functions in Python?",
                ],
            ),
            (
                "intermediate",
                &[
                    "What are the differences between lists and tuples in Python?",
                    "Explain the concept of decorators in Python and give an example",
                    "How do you handle exceptions in Python?",
                    "What are generators and when would you use them?",
                    "Describe the difference between class methods and static methods",
                ],
            ),
            (
                "advanced",
                &[
                    "How does the GIL (Global Interpreter Lock) work in Python?",
                    "Explain the concept of metaclasses in Python",
                    "What are context managers and how would you implement one?",
                    "How would you optimize the performance of a Python application?",
                ],
            ),
        ],
    ),
    (
        "JavaScript",
        [
            (
                "basic",
                &[
                    "What are the primitive data types in JavaScript?",
                    "What is a function in JavaScript?",
                    "How do arrays work in JavaScript?",
                    "What is the DOM and how do you interact with it?",
                ],
            ),
            (
                "intermediate",
                &[
                    "What is the difference between var, let and const?",
                    "Explain the concept of closures in JavaScript",
                    "How does hoisting work in JavaScript?",
                    "What is the Event Loop and how does it work?",
                    "Describe the differences between == and === in JavaScript",
                ],
            ),
            (
                "advanced",
                &[
                    "How would you implement the Observer pattern in JavaScript?",
                    "Explain the concept of currying and its advantages",
                    "What are Web Workers and when would you use them?",
                    "How do you handle asynchronous programming with async/await?",
                ],
            ),
        ],
    ),
    (
        "React",
        [
            (
                "basic",
                &[
                    "What is React and what are its main features?",
                    "What is JSX and why is it used in React?",
                    "How do you create a simple component in React?",
                    "What are props in React?",
                ],
            ),
            (
                "intermediate",
                &[
                    "What is the difference between functional and class components?",
                    "Explain how the Virtual DOM works",
                    "What are Hooks and which are the most common?",
                    "How do you manage state in a complex React application?",
                    "Explain the lifecycle of a React component",
                ],
            ),
            (
                "advanced",
                &[
                    "How would you implement a custom Hook?",
                    "What is React Suspense and how is it used?",
                    "How would you optimize the performance of a React application?",
                    "Explain the render props pattern in React",
                ],
            ),
        ],
    ),
    (
        "SQL",
        [
            (
                "basic",
                &[
                    "What is SQL and what is it used for?",
                    "What are the basic SQL commands?",
                    "What is a table in a relational database?",
                    "How do you write basic queries with SELECT?",
                ],
            ),
            (
                "intermediate",
                &[
                    "What is the difference between INNER JOIN and LEFT JOIN?",
                    "What are transactions and what are their ACID properties?",
                    "Explain the difference between clustered and non-clustered indexes",
                    "How would you optimize a slow SQL query?",
                    "What is database normalization?",
                ],
            ),
            (
                "advanced",
                &[
                    "How would you implement complex stored procedures?",
                    "What are window functions in SQL?",
                    "How do you handle concurrency in databases?",
                    "Explain table partitioning strategies",
                ],
            ),
        ],
    ),
    (
        "Docker",
        [
            (
                "basic",
                &[
                    "What is Docker and what problem does it solve?",
                    "What is the difference between virtualization and containerization?",
                    "What are Docker containers?",
                    "How do you run your first Docker container?",
                ],
            ),
            (
                "intermediate",
                &[
                    "What is the difference between an image and a container?",
                    "What is a Dockerfile and what are its main instructions?",
                    "Explain what volumes are in Docker",
                    "How do you handle environment variables in Docker?",
                    "What is Docker Compose and when would you use it?",
                ],
            ),
            (
                "advanced",
                &[
                    "How would you implement a multi-stage build strategy?",
                    "How would you optimize the size of Docker images?",
                    "What are health checks and how do you implement them?",
                    "How do you handle secrets in Docker securely?",
                ],
            ),
        ],
    ),
    (
        "Git",
        [
            (
                "basic",
                &[
                    "What is Git and what is it used for?",
                    "What are the basic Git commands?",
                    "What is a Git repository?",
                    "How do you make your first commit?",
                ],
            ),
            (
                "intermediate",
                &[
                    "What is the difference between merge and rebase?",
                    "How do you resolve conflicts in Git?",
                    "Explain what branches are and how you use them",
                    "Which commands do you use to undo changes in Git?",
                    "How do you manage a repository with multiple collaborators?",
                ],
            ),
            (
                "advanced",
                &[
                    "When and how would you use git cherry-pick?",
                    "What is git bisect and how would you use it for debugging?",
                    "How would you implement a branching strategy like GitFlow?",
                    "How do you manage releases and tags in large projects?",
                ],
            ),
        ],
    ),
    (
        "Node.js",
        [
            (
                "basic",
                &[
                    "What is Node.js and what are its features?",
                    "What is the difference between Node.js and browser JavaScript?",
                    "What is npm and how do you use it?",
                    "How do you create a basic HTTP server in Node.js?",
                ],
            ),
            (
                "intermediate",
                &[
                    "What is the Event Loop in Node.js?",
                    "What is the difference between require() and import?",
                    "Explain what middlewares are in Express",
                    "How do you handle asynchronous operations in Node.js?",
                    "How do you manage dependencies with package.json?",
                ],
            ),
            (
                "advanced",
                &[
                    "How would you implement clustering in Node.js?",
                    "What are streams in Node.js and how do you use them?",
                    "How do you approach debugging and profiling in Node.js applications?",
                    "What strategies do you use for error handling in Node.js applications?",
                ],
            ),
        ],
    ),
    (
        "Angular",
        [
            (
                "basic",
                &[
                    "What is Angular and what are its main features?",
                    "What is TypeScript and why does Angular use it?",
                    "How do you create a component in Angular?",
                    "What are services in Angular?",
                ],
            ),
            (
                "intermediate",
                &[
                    "How does dependency injection work in Angular?",
                    "What are observables and how are they used in Angular?",
                    "How do you implement routing in an Angular application?",
                    "What are directives and how do you create a custom one?",
                    "How do you handle reactive forms in Angular?",
                ],
            ),
            (
                "advanced",
                &[
                    "How do you implement lazy loading in Angular?",
                    "What are guards and when would you use them?",
                    "How do you optimize the performance of an Angular application?",
                    "How do you implement unit and integration testing in Angular?",
                ],
            ),
        ],
    ),
    (
        "AWS",
        [
            (
                "basic",
                &[
                    "What is AWS and what are its main services?",
                    "What is EC2 and what is it used for?",
                    "What is S3 and what are its use cases?",
                    "What are regions and availability zones in AWS?",
                ],
            ),
            (
                "intermediate",
                &[
                    "What is the difference between ELB and Auto Scaling?",
                    "What is Lambda and when would you use serverless functions?",
                    "How do you implement a VPC in AWS?",
                    "What is RDS and how would you configure a database?",
                    "How do you handle security with IAM in AWS?",
                ],
            ),
            (
                "advanced",
                &[
                    "How would you design a microservices architecture on AWS?",
                    "How do you implement CI/CD with AWS CodePipeline?",
                    "What strategies do you use to optimize costs in AWS?",
                    "How do you implement monitoring and logging with CloudWatch?",
                ],
            ),
        ],
    ),
    (
        "CSS",
        [
            (
                "basic",
                &[
                    "What is CSS and what is it used for?",
                    "What are the basic CSS selectors?",
                    "What is the box model in CSS?",
                    "How do you apply inline, internal and external styles?",
                ],
            ),
            (
                "intermediate",
                &[
                    "What is the difference between margin and padding?",
                    "What are pseudo-elements and pseudo-classes?",
                    "How does the Flexbox layout system work?",
                    "What is CSS Grid and when would you use it?",
                    "How do you handle responsiveness with media queries?",
                ],
            ),
            (
                "advanced",
                &[
                    "How do you implement complex animations with CSS?",
                    "What are CSS variables and how do you use them?",
                    "How do you optimize CSS performance in large applications?",
                    "Which methodologies do you use to organize CSS (BEM, SMACSS)?",
                ],
            ),
        ],
    ),
    (
        "MongoDB",
        [
            (
                "basic",
                &[
                    "What is MongoDB and what are its features?",
                    "What is the difference between relational and NoSQL databases?",
                    "What are documents and collections in MongoDB?",
                    "How do you insert and query basic documents?",
                ],
            ),
            (
                "intermediate",
                &[
                    "How do you run complex queries with aggregations?",
                    "What are indexes in MongoDB and how do you create them?",
                    "How do you handle relationships between documents?",
                    "What is sharding and when would you implement it?",
                    "How do you perform complex update operations?",
                ],
            ),
            (
                "advanced",
                &[
                    "How do you implement replication in MongoDB?",
                    "What strategies do you use to optimize queries?",
                    "How do you handle transactions in MongoDB?",
                    "How do you implement security and authentication in MongoDB?",
                ],
            ),
        ],
    ),
];
